//! Decoding a single BAM alignment record into a [`alignio_sam::Record`].

use alignio_sam::record::cigar::{self, Op};
use alignio_sam::Record;

use super::cursor::Cursor;
use super::{data, sequence};

/// Decodes one alignment record from `block`, the bytes following its
/// `block_size` length prefix (i.e. `block.len()` is expected to equal that
/// `block_size`).
///
/// `ref_names` is the reconciled reference-name table, indexed by `ref_id`.
/// Returns `None` if the fixed-size portion of the record is truncated.
pub fn decode(block: &[u8], ref_names: &[String]) -> Option<Record> {
    let mut cursor = Cursor::new(block);

    let ref_id = cursor.i32_le()?;
    let pos = cursor.i32_le()?;
    let l_read_name = cursor.u8()? as usize;
    let mapq = cursor.u8()?;
    let _bin = cursor.u16_le()?;
    let n_cigar_op = cursor.u16_le()? as usize;
    let flag = cursor.u16_le()?;
    let l_seq = cursor.u32_le()? as usize;
    let next_ref_id = cursor.i32_le()?;
    let next_pos = cursor.i32_le()?;
    let tlen = cursor.i32_le()?;

    let raw_name = cursor.take(l_read_name)?;
    let qname = std::str::from_utf8(raw_name)
        .unwrap_or("")
        .trim_end_matches('\0')
        .to_string();

    let mut ops = Vec::with_capacity(n_cigar_op);
    for _ in 0..n_cigar_op {
        let word = cursor.u32_le()?;
        ops.push(Op::from_u32(word));
    }

    let seq_bytes = cursor.take(l_seq.div_ceil(2))?;
    let seq = if l_seq == 0 {
        "*".to_string()
    } else {
        sequence::decode(seq_bytes, l_seq)
    };

    let qual_bytes = cursor.take(l_seq)?;
    let qual = if l_seq == 0 || qual_bytes.first() == Some(&0xFF) {
        "*".to_string()
    } else {
        qual_bytes
            .iter()
            .map(|&q| (q as u32 + 33) as u8 as char)
            .collect()
    };

    let tags = data::decode_tags(&mut cursor);

    Some(Record {
        qname,
        flag,
        rname: resolve_name(ref_id, ref_names),
        pos: translate_pos(pos),
        mapq,
        cigar: if n_cigar_op == 0 {
            "*".to_string()
        } else {
            cigar::format_cigar(&ops)
        },
        rnext: resolve_rnext(next_ref_id, ref_id, ref_names),
        pnext: translate_pos(next_pos),
        tlen,
        seq,
        qual,
        tags,
    })
}

fn translate_pos(pos: i32) -> i32 {
    if pos == -1 {
        0
    } else {
        pos + 1
    }
}

fn resolve_name(ref_id: i32, ref_names: &[String]) -> String {
    if ref_id < 0 {
        return "*".to_string();
    }

    ref_names
        .get(ref_id as usize)
        .cloned()
        .unwrap_or_else(|| "*".to_string())
}

fn resolve_rnext(next_ref_id: i32, ref_id: i32, ref_names: &[String]) -> String {
    if next_ref_id >= 0 && next_ref_id == ref_id {
        "=".to_string()
    } else {
        resolve_name(next_ref_id, ref_names)
    }
}
