//! The SAM text parser.

use std::{error, fmt};

use crate::{
    header::{Fields, Header},
    record::Record,
    SamFile,
};

/// An error returned when a SAM alignment line fails to parse.
#[derive(Debug)]
pub enum ParseError {
    /// The line had fewer than the eleven mandatory tab-separated fields.
    TooFewFields(usize),
    /// A mandatory numeric field was not a base-10 integer.
    InvalidNumericField(&'static str),
    /// A tag field was not of the form `TT:Y:V`.
    MalformedTag(String),
}

impl error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields(n) => {
                write!(f, "expected at least 11 tab-separated fields, got {n}")
            }
            Self::InvalidNumericField(name) => write!(f, "invalid {name} field"),
            Self::MalformedTag(s) => write!(f, "malformed tag field: {s:?}"),
        }
    }
}

/// Splits raw file contents into non-empty lines on `\r?\n`.
///
/// Line boundaries are located with [`memchr`] rather than [`str::split`],
/// matching how the BGZF block scanner locates its own delimiters.
fn lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut out = Vec::new();

    for i in memchr::memchr_iter(b'\n', bytes) {
        let line = &text[start..i];
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            out.push(line);
        }
        start = i + 1;
    }

    if start < bytes.len() {
        let line = text[start..].strip_suffix('\r').unwrap_or(&text[start..]);
        if !line.is_empty() {
            out.push(line);
        }
    }

    out
}

/// Parses a SAM file's full text into a header and a list of records.
pub fn parse(text: &str) -> Result<SamFile, ParseError> {
    let all_lines = lines(text);

    let split = all_lines
        .iter()
        .position(|line| !line.starts_with('@'))
        .unwrap_or(all_lines.len());

    let (header_lines, record_lines) = all_lines.split_at(split);

    let header = parse_header(header_lines);

    let records = record_lines
        .iter()
        .map(|line| parse_record(line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SamFile { header, records })
}

/// Parses the `@`-prefixed header lines of a SAM file.
///
/// Unknown `@` prefixes are ignored. A malformed `@HD`/`@SQ`/`@CO` line
/// yields a partial (possibly empty) record rather than an error, per the
/// SAM text parser's leniency policy.
pub fn parse_header<S: AsRef<str>>(lines: &[S]) -> Header {
    let mut header = Header::default();

    for line in lines {
        let line = line.as_ref();

        let Some(rest) = line.strip_prefix('@') else {
            continue;
        };

        let mut parts = rest.splitn(2, '\t');
        let Some(tag) = parts.next() else { continue };
        let remainder = parts.next().unwrap_or("");

        match tag {
            "HD" => header.hd = Some(parse_fields(remainder)),
            "SQ" => header.sq.push(parse_fields(remainder)),
            "RG" => header.rg.push(parse_fields(remainder)),
            "PG" => header.pg.push(parse_fields(remainder)),
            "CO" => header.co.push(remainder.to_string()),
            _ => {}
        }
    }

    header
}

fn parse_fields(s: &str) -> Fields {
    let mut fields = Fields::new();

    if s.is_empty() {
        return fields;
    }

    for token in s.split('\t') {
        if token.is_empty() {
            continue;
        }

        if let Some((key, value)) = token.split_once(':') {
            fields.insert(key.to_string(), value.to_string());
        }
    }

    fields
}

/// Parses a single tab-delimited alignment line.
///
/// The eleven mandatory fields are parsed positionally; numeric fields use
/// base-10 parsing with no locale. Remaining fields are optional tags.
pub fn parse_record(line: &str) -> Result<Record, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() < 11 {
        return Err(ParseError::TooFewFields(fields.len()));
    }

    let mut record = Record {
        qname: fields[0].to_string(),
        flag: parse_int(fields[1], "FLAG")?,
        rname: fields[2].to_string(),
        pos: parse_int(fields[3], "POS")?,
        mapq: parse_int(fields[4], "MAPQ")?,
        cigar: fields[5].to_string(),
        rnext: fields[6].to_string(),
        pnext: parse_int(fields[7], "PNEXT")?,
        tlen: parse_int(fields[8], "TLEN")?,
        seq: fields[9].to_string(),
        qual: fields[10].to_string(),
        tags: Default::default(),
    };

    for field in &fields[11..] {
        let (key, type_code, value) = split_tag(field)?;
        let decoded = crate::record::data::parse_tag_value(type_code, value)
            .map_err(|_| ParseError::MalformedTag((*field).to_string()))?;
        record.tags.insert(key, (type_code, decoded));
    }

    Ok(record)
}

fn split_tag(field: &str) -> Result<([u8; 2], char, &str), ParseError> {
    let mut parts = field.splitn(3, ':');

    let key = parts.next().ok_or_else(|| ParseError::MalformedTag(field.to_string()))?;
    let type_str = parts.next().ok_or_else(|| ParseError::MalformedTag(field.to_string()))?;
    let value = parts.next().ok_or_else(|| ParseError::MalformedTag(field.to_string()))?;

    let key_bytes = key.as_bytes();
    if key_bytes.len() != 2 {
        return Err(ParseError::MalformedTag(field.to_string()));
    }

    let type_code = type_str
        .chars()
        .next()
        .ok_or_else(|| ParseError::MalformedTag(field.to_string()))?;

    Ok(([key_bytes[0], key_bytes[1]], type_code, value))
}

fn parse_int<T: lexical_core::FromLexical>(s: &str, name: &'static str) -> Result<T, ParseError> {
    lexical_core::parse(s.as_bytes()).map_err(|_| ParseError::InvalidNumericField(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    // S1
    #[test]
    fn test_parse_header_scenario_s1() {
        let lines = [
            "@HD\tVN:1.6\tSO:coordinate",
            "@SQ\tSN:pstS\tLN:1000",
            "@RG\tID:1\tSM:sample1",
            "@PG\tID:minimap2\tPN:minimap2\tVN:2.24-r1122",
            "@CO\tExample SAM file for testing",
        ];

        let header = parse_header(&lines);

        let hd = header.hd.unwrap();
        assert_eq!(hd.get("VN").unwrap(), "1.6");
        assert_eq!(hd.get("SO").unwrap(), "coordinate");

        assert_eq!(header.sq[0].get("SN").unwrap(), "pstS");
        assert_eq!(header.sq[0].get("LN").unwrap(), "1000");

        assert_eq!(header.rg[0].get("ID").unwrap(), "1");
        assert_eq!(header.pg[0].get("ID").unwrap(), "minimap2");
        assert_eq!(header.co[0], "Example SAM file for testing");
    }

    #[test]
    fn test_parse_header_malformed_lines_are_lenient() {
        let lines = ["@HD", "@SQ\tLN:1000", "@CO", "@XX\tunknown:ignored"];
        let header = parse_header(&lines);

        assert_eq!(header.hd, Some(Fields::new()));
        assert_eq!(header.sq[0].get("LN").unwrap(), "1000");
        assert!(header.sq[0].get("SN").is_none());
        assert_eq!(header.co[0], "");
    }

    // S2
    #[test]
    fn test_parse_record_scenario_s2() {
        let line = "read1\t0\tpstS\t1\t60\t10M\t*\t0\t0\tACGTACGTAC\t!!!!!!!!!!";
        let record = parse_record(line).unwrap();

        assert_eq!(record.qname, "read1");
        assert_eq!(record.flag, 0);
        assert_eq!(record.rname, "pstS");
        assert_eq!(record.pos, 1);
        assert_eq!(record.mapq, 60);
        assert_eq!(record.cigar, "10M");
        assert_eq!(record.seq, "ACGTACGTAC");
        assert_eq!(record.qual, "!!!!!!!!!!");
    }

    #[test]
    fn test_parse_record_requires_eleven_fields() {
        let line = "read1\t0\tpstS\t1\t60\t10M\t*\t0\t0\tACGTACGTAC";
        assert!(parse_record(line).is_err());
    }

    #[test]
    fn test_parse_record_with_tags() {
        let line = "read1\t0\tpstS\t1\t60\t10M\t*\t0\t0\tACGTACGTAC\t!!!!!!!!!!\tNM:i:2\tRG:Z:1";
        let record = parse_record(line).unwrap();

        assert_eq!(
            record.tags.get(b"NM"),
            Some(&('i', crate::record::data::Value::Int(2)))
        );
        assert_eq!(
            record.tags.get(b"RG"),
            Some(&('Z', crate::record::data::Value::String("1".to_string())))
        );
    }
}
