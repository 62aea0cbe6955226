//! Shared helpers for building synthetic BAM byte streams in integration
//! tests, mirroring the BGZF member construction used in
//! `alignio-bgzf`/`alignio-bam`'s own unit tests.

use std::io::Write;

use flate2::{write::DeflateEncoder, Compression, Crc};

const BASES: [char; 16] = [
    '=', 'A', 'C', 'M', 'G', 'R', 'S', 'V', 'T', 'W', 'Y', 'H', 'K', 'D', 'B', 'N',
];

pub const MAGIC: [u8; 4] = *b"BAM\x01";

fn bgzf_wrap(payload: &[u8]) -> Vec<u8> {
    let mut deflated = Vec::new();
    {
        let mut encoder = DeflateEncoder::new(&mut deflated, Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap();
    }

    let mut crc = Crc::new();
    crc.update(payload);

    let bsize = (10 + 2 + 6 + deflated.len() + 4 + 4 - 1) as u16;

    let mut block = Vec::new();
    block.extend_from_slice(&[0x1f, 0x8b, 0x08, 0x04, 0, 0, 0, 0, 0, 0xff]);
    block.extend_from_slice(&6u16.to_le_bytes());
    block.extend_from_slice(b"BC");
    block.extend_from_slice(&2u16.to_le_bytes());
    block.extend_from_slice(&bsize.to_le_bytes());
    block.extend_from_slice(&deflated);
    block.extend_from_slice(&crc.sum().to_le_bytes());
    block.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    block
}

fn pack_seq(seq: &str) -> Vec<u8> {
    let codes: Vec<u8> = seq
        .chars()
        .map(|c| BASES.iter().position(|&b| b == c).unwrap_or(15) as u8)
        .collect();

    codes
        .chunks(2)
        .map(|pair| {
            let hi = pair[0] << 4;
            let lo = pair.get(1).copied().unwrap_or(0);
            hi | lo
        })
        .collect()
}

/// One alignment to encode into a synthetic BAM stream.
pub struct TestAlignment {
    pub ref_id: i32,
    pub pos: i32,
    pub name: &'static str,
    pub mapq: u8,
    pub flag: u16,
    pub cigar: Vec<(u32, u8)>,
    pub next_ref_id: i32,
    pub next_pos: i32,
    pub tlen: i32,
    pub seq: &'static str,
    pub qual: Option<&'static [u8]>,
}

fn encode_alignment(a: &TestAlignment) -> Vec<u8> {
    let mut block = Vec::new();
    block.extend_from_slice(&a.ref_id.to_le_bytes());
    block.extend_from_slice(&a.pos.to_le_bytes());
    block.push((a.name.len() + 1) as u8);
    block.push(a.mapq);
    block.extend_from_slice(&0u16.to_le_bytes()); // bin
    block.extend_from_slice(&(a.cigar.len() as u16).to_le_bytes());
    block.extend_from_slice(&a.flag.to_le_bytes());
    block.extend_from_slice(&(a.seq.len() as u32).to_le_bytes());
    block.extend_from_slice(&a.next_ref_id.to_le_bytes());
    block.extend_from_slice(&a.next_pos.to_le_bytes());
    block.extend_from_slice(&a.tlen.to_le_bytes());

    block.extend_from_slice(a.name.as_bytes());
    block.push(0);

    for (len, op) in &a.cigar {
        let word = (len << 4) | (*op as u32);
        block.extend_from_slice(&word.to_le_bytes());
    }

    block.extend_from_slice(&pack_seq(a.seq));

    match a.qual {
        Some(q) => block.extend_from_slice(q),
        None => block.extend_from_slice(&vec![0xFFu8; a.seq.len()]),
    }

    let mut record = Vec::new();
    record.extend_from_slice(&(block.len() as u32).to_le_bytes());
    record.extend_from_slice(&block);
    record
}

/// Builds a complete BGZF-wrapped BAM byte stream from header text, a
/// reference table, and a list of alignments.
pub fn make_bam(text: &str, ref_names: &[(&str, u32)], alignments: &[TestAlignment]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&MAGIC);
    payload.extend_from_slice(&(text.len() as u32).to_le_bytes());
    payload.extend_from_slice(text.as_bytes());

    payload.extend_from_slice(&(ref_names.len() as u32).to_le_bytes());
    for (name, len) in ref_names {
        let name_with_nul = format!("{name}\0");
        payload.extend_from_slice(&(name_with_nul.len() as u32).to_le_bytes());
        payload.extend_from_slice(name_with_nul.as_bytes());
        payload.extend_from_slice(&len.to_le_bytes());
    }

    for alignment in alignments {
        payload.extend_from_slice(&encode_alignment(alignment));
    }

    bgzf_wrap(&payload)
}
