//! A thin facade over the leaf SAM/BAM codec crates: `alignio-bgzf`,
//! `alignio-sam`, and `alignio-bam`.
//!
//! This crate adds nothing of its own beyond the path-based entry points
//! ([`parse_file`], [`parse_sam`], [`parse_bam`], [`write_sam`]), the
//! region-expression helper, and re-exports of the leaf crates' codec and
//! query surface so consumers don't need to depend on them directly.
//! Everything below this layer — the codec proper — takes and returns
//! in-memory byte/string values, per this project's value-in/value-out
//! boundary; only this facade touches the filesystem, and only by the
//! minimal "read file contents" / "write bytes to path" operations that
//! boundary allows.

mod region;

use std::{fs, io, path::Path};

pub use alignio_sam::{
    by_reference, extract_quality_scores, filter_by_position, filter_by_reference,
    reference_sequences, Header, Record, SamFile,
};
pub use alignio_sam::header::Fields;
pub use alignio_sam::reader::{parse_header, parse_record as parse_alignment, ParseError};
pub use alignio_sam::record::cigar::{
    analyze_cigar, format_cigar, get_end_position, overlaps_region, parse_cigar, CigarSummary,
    Error as CigarDerivationError, Kind as CigarOpKind, Op as CigarOp, ParseError as CigarParseError,
};
pub use alignio_sam::record::data::{
    format_tag_value, infer_array_type, parse_tag_value, ArrayValue, NumericElement,
    ParseError as TagParseError, Value as TagValue,
};
pub use alignio_sam::record::flags::{build_flag, interpret_flags, FlagBooleans, Flags};
pub use alignio_sam::record::reference::{
    create_alignment_view, extract_reference_sequence, Error as ReferenceError,
};
pub use region::{ParseError as RegionParseError, Region};

/// Parses the file at `path` as either BAM or SAM, dispatching on its
/// extension (`.bam` vs. anything else, treated as `.sam`).
pub fn parse_file<P>(path: P) -> io::Result<SamFile>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("bam") => parse_bam(path),
        _ => parse_sam(path),
    }
}

/// Reads the file at `path` and parses it as SAM text.
pub fn parse_sam<P>(path: P) -> io::Result<SamFile>
where
    P: AsRef<Path>,
{
    let bytes = fs::read(path)?;
    parse_sam_bytes(&bytes)
}

/// Reads the file at `path`, decompresses it as BGZF, and decodes it as BAM.
pub fn parse_bam<P>(path: P) -> io::Result<SamFile>
where
    P: AsRef<Path>,
{
    let bytes = fs::read(path)?;
    parse_bam_bytes(&bytes)
}

/// Serializes `sam_file` to SAM text and writes it to `path`.
pub fn write_sam<P>(sam_file: &SamFile, path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let text = alignio_sam::writer::write(sam_file);
    fs::write(path, text)
}

/// Parses already-in-memory bytes as SAM text.
///
/// This is the byte-level entry point `parse_sam` delegates to after reading
/// its path; callers that already hold file contents (e.g. bytes fetched
/// over the network, or embedded test fixtures) can call it directly.
pub fn parse_sam_bytes(bytes: &[u8]) -> io::Result<SamFile> {
    let text = String::from_utf8_lossy(bytes);
    alignio_sam::reader::parse(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Decompresses and decodes already-in-memory bytes as BAM.
pub fn parse_bam_bytes(bytes: &[u8]) -> io::Result<SamFile> {
    alignio_bam::read(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn temp_path(suffix: &str) -> std::path::PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("alignio-lib-test-{}-{n}{suffix}", std::process::id()))
    }

    #[test]
    fn test_parse_file_dispatches_on_extension() {
        let sam_text = "@HD\tVN:1.6\nread1\t4\t*\t0\t0\t*\t*\t0\t0\t*\t*\n";

        let path = temp_path(".sam");
        fs::write(&path, sam_text).unwrap();
        let sam_file = parse_file(&path).unwrap();
        assert_eq!(sam_file.records.len(), 1);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_file_bam_extension_rejects_non_bgzf_bytes() {
        let path = temp_path(".bam");
        fs::write(&path, b"not bgzf").unwrap();
        assert!(parse_file(&path).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_sam_round_trips_through_parse_sam() {
        let sam_text = "@HD\tVN:1.6\nread1\t4\t*\t0\t0\t*\t*\t0\t0\t*\t*\n";
        let sam_file = parse_sam_bytes(sam_text.as_bytes()).unwrap();

        let path = temp_path(".sam");
        write_sam(&sam_file, &path).unwrap();

        let reparsed = parse_sam(&path).unwrap();
        assert_eq!(sam_file, reparsed);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_sam_surfaces_source_absent_as_error() {
        let path = temp_path(".sam.does-not-exist");
        assert!(parse_sam(&path).is_err());
    }
}
