//! Deriving reference-relative and visual representations of an alignment
//! against an external reference sequence.

use std::{error, fmt};

use crate::record::{
    cigar::{self, Kind},
    Record,
};

/// An error returned when a reference-consuming derivation is asked to read
/// past the bounds of the supplied reference, or the record's CIGAR is
/// malformed.
#[derive(Debug)]
pub enum Error {
    /// The record's CIGAR string failed to parse.
    Cigar(cigar::ParseError),
    /// The alignment's starting position is outside the reference.
    StartOutOfBounds,
    /// A CIGAR operation walked past the end of the reference.
    EndOutOfBounds,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cigar(e) => write!(f, "malformed CIGAR: {e}"),
            Self::StartOutOfBounds => write!(f, "alignment start position is out of bounds"),
            Self::EndOutOfBounds => write!(f, "alignment extends past the end of the reference"),
        }
    }
}

impl From<cigar::ParseError> for Error {
    fn from(e: cigar::ParseError) -> Self {
        Self::Cigar(e)
    }
}

/// Reconstructs the slice of `reference` that `record`'s CIGAR consumes,
/// starting at `record.pos - 1` (converted to 0-based).
///
/// `M`/`=`/`X` copy bases from the reference; `D` advances the reference
/// cursor without emitting; `N` emits `len` copies of `'N'` and advances;
/// all other ops neither advance nor emit.
pub fn extract_reference_sequence(record: &Record, reference: &[u8]) -> Result<String, Error> {
    let ops = cigar::parse_cigar(&record.cigar)?;

    let start = (record.pos - 1).max(0) as usize;
    if record.pos < 1 || start > reference.len() {
        return Err(Error::StartOutOfBounds);
    }

    let mut cursor = start;
    let mut out = Vec::new();

    for op in ops {
        let len = op.len as usize;

        match op.kind {
            Kind::Match | Kind::SequenceMatch | Kind::SequenceMismatch => {
                let end = cursor.checked_add(len).ok_or(Error::EndOutOfBounds)?;
                let slice = reference.get(cursor..end).ok_or(Error::EndOutOfBounds)?;
                out.extend_from_slice(slice);
                cursor = end;
            }
            Kind::Deletion => {
                cursor = cursor.checked_add(len).ok_or(Error::EndOutOfBounds)?;
                if cursor > reference.len() {
                    return Err(Error::EndOutOfBounds);
                }
            }
            Kind::Skip => {
                out.extend(std::iter::repeat(b'N').take(len));
                cursor = cursor.checked_add(len).ok_or(Error::EndOutOfBounds)?;
                if cursor > reference.len() {
                    return Err(Error::EndOutOfBounds);
                }
            }
            _ => {}
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Builds a three-line visual alignment: a reference row, a match row
/// (`|` on identity, ` ` on mismatch or non-identity ops), and a read row.
///
/// `"*"` `SEQ` or `CIGAR` produce an advisory string rather than an error,
/// since the view is diagnostic, not a derivation callers depend on for
/// correctness.
pub fn create_alignment_view(record: &Record, reference: &[u8]) -> String {
    if record.cigar == "*" || record.seq == "*" {
        return format!(
            "Ref:  (unavailable)\n      \nRead: (unavailable)\nreason: {}",
            if record.cigar == "*" {
                "no CIGAR"
            } else {
                "no SEQ"
            }
        );
    }

    let ops = match cigar::parse_cigar(&record.cigar) {
        Ok(ops) => ops,
        Err(_) => return "Ref:  (unavailable)\n      \nRead: (unavailable)\nreason: malformed CIGAR".to_string(),
    };

    let seq = record.seq.as_bytes();
    let mut ref_cursor = (record.pos.max(1) - 1) as usize;
    let mut read_cursor = 0usize;

    let mut ref_row = String::new();
    let mut match_row = String::new();
    let mut read_row = String::new();

    for op in ops {
        let len = op.len as usize;

        match op.kind {
            Kind::Match => {
                for _ in 0..len {
                    let r = reference.get(ref_cursor).copied();
                    let q = seq.get(read_cursor).copied();

                    ref_row.push(r.map(|b| b as char).unwrap_or('N'));
                    read_row.push(q.map(|b| b as char).unwrap_or('N'));
                    match_row.push(if r.is_some() && r == q { '|' } else { ' ' });

                    ref_cursor += 1;
                    read_cursor += 1;
                }
            }
            Kind::SequenceMatch => {
                push_slice(&mut ref_row, reference, ref_cursor, len);
                push_slice(&mut read_row, seq, read_cursor, len);
                match_row.extend(std::iter::repeat('|').take(len));
                ref_cursor += len;
                read_cursor += len;
            }
            Kind::SequenceMismatch => {
                push_slice(&mut ref_row, reference, ref_cursor, len);
                push_slice(&mut read_row, seq, read_cursor, len);
                match_row.extend(std::iter::repeat(' ').take(len));
                ref_cursor += len;
                read_cursor += len;
            }
            Kind::Insertion => {
                ref_row.extend(std::iter::repeat('-').take(len));
                push_slice(&mut read_row, seq, read_cursor, len);
                match_row.extend(std::iter::repeat(' ').take(len));
                read_cursor += len;
            }
            Kind::Deletion => {
                push_slice(&mut ref_row, reference, ref_cursor, len);
                read_row.extend(std::iter::repeat('-').take(len));
                match_row.extend(std::iter::repeat(' ').take(len));
                ref_cursor += len;
            }
            Kind::Skip => {
                ref_row.extend(std::iter::repeat('N').take(len));
                read_row.extend(std::iter::repeat('-').take(len));
                match_row.extend(std::iter::repeat(' ').take(len));
                ref_cursor += len;
            }
            Kind::SoftClip => {
                ref_row.extend(std::iter::repeat(' ').take(len));
                push_slice(&mut read_row, seq, read_cursor, len);
                match_row.extend(std::iter::repeat(' ').take(len));
                read_cursor += len;
            }
            Kind::HardClip | Kind::Pad | Kind::Unknown => {}
        }
    }

    format!("Ref:  {ref_row}\n      {match_row}\nRead: {read_row}")
}

fn push_slice(out: &mut String, data: &[u8], start: usize, len: usize) {
    for i in start..start + len {
        out.push(data.get(i).map(|b| *b as char).unwrap_or('N'));
    }
}
