//! The unified in-memory value shared by the SAM text and BAM binary
//! codecs, plus the query helpers that operate on it.

use indexmap::IndexMap;

use crate::{header::Header, record::Record};

/// A SAM/BAM file's header paired with its ordered alignment records.
///
/// This is the single value both [`crate::reader::parse`] (SAM text) and
/// `alignio_bam`'s binary reader produce — order is preserved exactly as
/// read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SamFile {
    pub header: Header,
    pub records: Vec<Record>,
}

impl SamFile {
    /// Creates a new `SamFile` from a header and its records.
    pub fn new(header: Header, records: Vec<Record>) -> Self {
        Self { header, records }
    }
}

/// Returns a new `SamFile` containing only the records whose `rname`
/// matches `name` exactly, preserving source order and tag contents.
pub fn filter_by_reference(sam_file: &SamFile, name: &str) -> SamFile {
    let records = sam_file
        .records
        .iter()
        .filter(|record| record.rname == name)
        .cloned()
        .collect();

    SamFile::new(sam_file.header.clone(), records)
}

/// Returns a new `SamFile` containing only the records whose `pos` falls in
/// the closed interval `[start, end]`.
///
/// This compares `pos` only, not the CIGAR-derived end position — a record
/// whose alignment extends past `end` but starts within range is still
/// retained.
pub fn filter_by_position(sam_file: &SamFile, start: i32, end: i32) -> SamFile {
    let records = sam_file
        .records
        .iter()
        .filter(|record| record.pos >= start && record.pos <= end)
        .cloned()
        .collect();

    SamFile::new(sam_file.header.clone(), records)
}

/// Returns the ordered `SN` values of the header's `@SQ` dictionary.
pub fn reference_sequences(sam_file: &SamFile) -> Vec<&str> {
    sam_file
        .header
        .sq
        .iter()
        .filter_map(|fields| fields.get("SN"))
        .map(String::as_str)
        .collect()
}

/// Converts a record's `QUAL` field into Phred quality scores (`c - 33`
/// per character).
///
/// `"*"` decodes to an empty list.
pub fn extract_quality_scores(record: &Record) -> Vec<u8> {
    if record.qual == "*" {
        return Vec::new();
    }

    record.qual.bytes().map(|b| b.saturating_sub(33)).collect()
}

/// Groups `sam_file`'s records by `rname`, preserving first-seen reference
/// order and each group's internal record order.
pub fn by_reference(sam_file: &SamFile) -> IndexMap<&str, Vec<&Record>> {
    let mut groups: IndexMap<&str, Vec<&Record>> = IndexMap::new();

    for record in &sam_file.records {
        groups.entry(record.rname.as_str()).or_default().push(record);
    }

    groups
}
