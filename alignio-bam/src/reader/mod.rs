//! Decoding a BGZF-compressed BAM byte stream into a [`alignio_sam::SamFile`].

mod cursor;
mod data;
mod record;
mod reference_table;
mod sequence;

use std::io;

use alignio_sam::{Record as SamRecord, SamFile};

use crate::error::DecodeError;
use cursor::Cursor;

const MAGIC: [u8; 4] = *b"BAM\x01";

/// Decompresses `src` as BGZF and decodes it as a BAM byte stream.
///
/// Parsing is truncation-tolerant past the fixed header: a length-prefixed
/// alignment record that is cut short stops the loop and returns the
/// records decoded so far, per the recovery-over-rejection philosophy that
/// governs this whole crate.
pub fn read(src: &[u8]) -> io::Result<SamFile> {
    let data = alignio_bgzf::decompress_all(src)?;
    let mut cursor = Cursor::new(&data);

    let magic = cursor.take(4).ok_or(DecodeError::Truncated)?;
    if magic != MAGIC.as_slice() {
        return Err(DecodeError::InvalidMagic.into());
    }

    let l_text = cursor.u32_le().ok_or(DecodeError::Truncated)? as usize;
    let raw_text = cursor.take(l_text).ok_or(DecodeError::Truncated)?;
    let text = String::from_utf8_lossy(raw_text);
    let header_lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .collect();

    let mut header = alignio_sam::reader::parse_header(&header_lines);

    let table = reference_table::read(&mut cursor).ok_or(DecodeError::Truncated)?;
    reference_table::reconcile(&mut header, &table);
    let ref_names: Vec<String> = table.into_iter().map(|entry| entry.name).collect();

    let mut records: Vec<SamRecord> = Vec::new();

    while let Some(block_size) = cursor.u32_le() {
        let Some(block) = cursor.take(block_size as usize) else {
            break;
        };

        match record::decode(block, &ref_names) {
            Some(rec) => records.push(rec),
            None => break,
        }
    }

    Ok(SamFile::new(header, records))
}
