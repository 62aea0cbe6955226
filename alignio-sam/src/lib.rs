//! Sequence Alignment/Map (SAM) format reader and writer.
//!
//! This crate owns the shared in-memory alignment model — [`Header`],
//! [`Record`], and [`SamFile`] — along with everything that's pure SAM-text
//! or pure in-memory: the CIGAR codec, the FLAG interpreter, the tag codec,
//! and the text parser/emitter. `alignio-bam` builds on top of this crate
//! to decode the binary BAM encoding into the same [`SamFile`] value.

pub mod header;
pub mod reader;
pub mod record;
mod sam_file;
pub mod writer;

pub use self::{
    header::Header,
    record::Record,
    sam_file::{
        by_reference, extract_quality_scores, filter_by_position, filter_by_reference,
        reference_sequences, SamFile,
    },
};
