//! The SAM text emitter.

use crate::{
    header::{Fields, Header},
    record::{data, Record},
    SamFile,
};

/// Formats a whole `SamFile` (header then alignments) as SAM text.
///
/// Lines are joined with `\n` with no trailing newline.
pub fn write(sam_file: &SamFile) -> String {
    let mut lines = Vec::new();

    lines.extend(write_header_lines(&sam_file.header));

    for record in &sam_file.records {
        lines.push(write_record(record));
    }

    lines.join("\n")
}

/// Formats just the header portion as SAM text lines, in the mandated
/// emission order: `@HD`, all `@SQ`, all `@RG`, all `@PG`, all `@CO`.
pub fn write_header(header: &Header) -> String {
    write_header_lines(header).join("\n")
}

fn write_header_lines(header: &Header) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(hd) = &header.hd {
        lines.push(write_tagged_line("HD", hd));
    }

    for sq in &header.sq {
        lines.push(write_tagged_line("SQ", sq));
    }

    for rg in &header.rg {
        lines.push(write_tagged_line("RG", rg));
    }

    for pg in &header.pg {
        lines.push(write_tagged_line("PG", pg));
    }

    for co in &header.co {
        lines.push(format!("@CO\t{co}"));
    }

    lines
}

fn write_tagged_line(tag: &str, fields: &Fields) -> String {
    let mut line = format!("@{tag}");

    for (key, value) in fields {
        line.push('\t');
        line.push_str(key);
        line.push(':');
        line.push_str(value);
    }

    line
}

/// Formats a single alignment record as a tab-delimited SAM line: the
/// eleven mandatory fields, then each tag as `TT:Y:V`.
pub fn write_record(record: &Record) -> String {
    let mut fields = vec![
        record.qname.clone(),
        record.flag.to_string(),
        record.rname.clone(),
        record.pos.to_string(),
        record.mapq.to_string(),
        record.cigar.clone(),
        record.rnext.clone(),
        record.pnext.to_string(),
        record.tlen.to_string(),
        record.seq.clone(),
        record.qual.clone(),
    ];

    for (key, (type_code, value)) in &record.tags {
        let key = std::str::from_utf8(key).unwrap_or("??");
        let text = data::format_tag_value(value);
        fields.push(format!("{key}:{type_code}:{text}"));
    }

    fields.join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Fields;

    #[test]
    fn test_write_record_mandatory_fields() {
        let mut record = Record::default();
        record.qname = "read1".to_string();
        record.rname = "pstS".to_string();
        record.pos = 1;
        record.mapq = 60;
        record.cigar = "10M".to_string();
        record.rnext = "*".to_string();
        record.seq = "ACGTACGTAC".to_string();
        record.qual = "!!!!!!!!!!".to_string();

        assert_eq!(
            write_record(&record),
            "read1\t0\tpstS\t1\t60\t10M\t*\t0\t0\tACGTACGTAC\t!!!!!!!!!!"
        );
    }

    #[test]
    fn test_write_header_order() {
        let mut hd = Fields::new();
        hd.insert("VN".to_string(), "1.6".to_string());

        let mut sq = Fields::new();
        sq.insert("SN".to_string(), "chr1".to_string());

        let mut header = Header::default();
        header.hd = Some(hd);
        header.sq.push(sq);
        header.co.push("a comment".to_string());

        let text = write_header(&header);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "@HD\tVN:1.6");
        assert_eq!(lines[1], "@SQ\tSN:chr1");
        assert_eq!(lines[2], "@CO\ta comment");
    }

    #[test]
    fn test_write_tagged_line_no_fields() {
        let fields = Fields::new();
        assert_eq!(write_tagged_line("HD", &fields), "@HD");
    }
}
