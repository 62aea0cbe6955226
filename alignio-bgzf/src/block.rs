//! BGZF block (gzip member) header scanning.
//!
//! A BGZF member is a standards-compliant gzip member whose extra field
//! (`FLG.FEXTRA`, signature `1F 8B 08 04`) carries a two-byte `BC` subfield
//! holding `BSIZE = total_block_size - 1` as a little-endian `u16`.

/// The four leading bytes common to every BGZF member: gzip magic plus the
/// `FEXTRA` flag.
pub const MAGIC: [u8; 4] = [0x1f, 0x8b, 0x08, 0x04];

const GZIP_HEADER_LEN: usize = 10;
const SUBFIELD_ID: [u8; 2] = *b"BC";

/// Reads the total on-wire length of the BGZF member starting at the front
/// of `block`, if `block` begins with a structurally valid BGZF header.
///
/// Returns `None` if the header is truncated, the magic doesn't match, or no
/// `BC` subfield is found in the extra field — callers should treat this as
/// "not a block here" and advance one byte rather than reject outright
/// (spec'd recovery-over-rejection behavior).
pub fn header_len(block: &[u8]) -> Option<usize> {
    if block.len() < GZIP_HEADER_LEN + 2 || block[..4] != MAGIC {
        return None;
    }

    let xlen = u16::from_le_bytes([block[10], block[11]]) as usize;
    let extra_start = GZIP_HEADER_LEN + 2;
    let extra_end = extra_start.checked_add(xlen)?;

    if block.len() < extra_end {
        return None;
    }

    let extra = &block[extra_start..extra_end];
    let bsize = find_bsize(extra)?;

    Some(bsize as usize + 1)
}

fn find_bsize(extra: &[u8]) -> Option<u16> {
    let mut i = 0;

    while i + 4 <= extra.len() {
        let si = [extra[i], extra[i + 1]];
        let slen = u16::from_le_bytes([extra[i + 2], extra[i + 3]]) as usize;
        let data_start = i + 4;
        let data_end = data_start.checked_add(slen)?;

        if data_end > extra.len() {
            return None;
        }

        if si == SUBFIELD_ID && slen == 2 {
            return Some(u16::from_le_bytes([extra[data_start], extra[data_start + 1]]));
        }

        i = data_end;
    }

    None
}
