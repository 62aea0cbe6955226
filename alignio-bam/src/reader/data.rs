//! Decoding BAM's binary auxiliary-tag encoding into the shared
//! [`alignio_sam::record::data`] model.

use alignio_sam::record::data::{ArrayValue, Tags, Value};

use super::cursor::Cursor;

/// Decodes tags from `cursor` until it is exhausted.
///
/// An unknown type byte stops parsing for the *record* (the aux block has
/// no length prefix of its own to skip past), but the tags already decoded
/// are kept, per the truncation-tolerant contract of the BAM reader.
pub fn decode_tags(cursor: &mut Cursor<'_>) -> Tags {
    let mut tags = Tags::new();

    while cursor.remaining() >= 3 {
        let Some(key) = read_key(cursor) else { break };
        let Some(type_code) = cursor.u8() else { break };

        match decode_one(cursor, type_code as char) {
            Some(value) => {
                tags.insert(key, (type_code as char, value));
            }
            None => break,
        }
    }

    tags
}

fn read_key(cursor: &mut Cursor<'_>) -> Option<[u8; 2]> {
    let a = cursor.u8()?;
    let b = cursor.u8()?;
    Some([a, b])
}

fn decode_one(cursor: &mut Cursor<'_>, type_code: char) -> Option<Value> {
    match type_code {
        'A' => cursor.u8().map(|b| Value::Char(b as char)),
        'c' => cursor.u8().map(|b| Value::Int(b as i8 as i64)),
        'C' => cursor.u8().map(|b| Value::Int(b as i64)),
        's' => cursor.u16_le().map(|v| Value::Int(v as i16 as i64)),
        'S' => cursor.u16_le().map(|v| Value::Int(v as i64)),
        'i' => cursor.i32_le().map(|v| Value::Int(v as i64)),
        'I' => cursor.u32_le().map(|v| Value::Int(v as i64)),
        'f' => cursor.f32_le().map(|v| Value::Float(v as f64)),
        'Z' => read_cstr(cursor).map(Value::String),
        'H' => read_cstr(cursor).map(Value::Hex),
        'B' => decode_array(cursor),
        _ => None,
    }
}

fn read_cstr(cursor: &mut Cursor<'_>) -> Option<String> {
    let mut bytes = Vec::new();

    loop {
        let b = cursor.u8()?;
        if b == 0 {
            break;
        }
        bytes.push(b);
    }

    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Bounds a wire-reported element `count` against the bytes actually left in
/// `cursor`, so a corrupted or truncated count can't force a pre-emptive
/// allocation far larger than the input could ever fill.
fn bounded_capacity(cursor: &Cursor<'_>, count: usize, element_width: usize) -> usize {
    count.min(cursor.remaining() / element_width)
}

fn decode_array(cursor: &mut Cursor<'_>) -> Option<Value> {
    let subtype = cursor.u8()? as char;
    let count = cursor.u32_le()? as usize;

    match subtype {
        'f' => {
            let mut values = Vec::with_capacity(bounded_capacity(cursor, count, 4));
            for _ in 0..count {
                values.push(cursor.f32_le()? as f64);
            }
            Some(Value::Array(ArrayValue::Float(values)))
        }
        'c' => read_int_array(cursor, count, 1, subtype, |c| c.u8().map(|b| b as i8 as i64)),
        'C' => read_int_array(cursor, count, 1, subtype, |c| c.u8().map(|b| b as i64)),
        's' => read_int_array(cursor, count, 2, subtype, |c| c.u16_le().map(|v| v as i16 as i64)),
        'S' => read_int_array(cursor, count, 2, subtype, |c| c.u16_le().map(|v| v as i64)),
        'i' => read_int_array(cursor, count, 4, subtype, |c| c.i32_le().map(|v| v as i64)),
        'I' => read_int_array(cursor, count, 4, subtype, |c| c.u32_le().map(|v| v as i64)),
        _ => None,
    }
}

fn read_int_array(
    cursor: &mut Cursor<'_>,
    count: usize,
    element_width: usize,
    subtype: char,
    mut read_one: impl FnMut(&mut Cursor<'_>) -> Option<i64>,
) -> Option<Value> {
    let mut values = Vec::with_capacity(bounded_capacity(cursor, count, element_width));
    for _ in 0..count {
        values.push(read_one(cursor)?);
    }
    Some(Value::Array(ArrayValue::Int(subtype, values)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_for(type_code: u8, payload: &[u8]) -> Vec<u8> {
        let mut v = vec![b'N', b'M', type_code];
        v.extend_from_slice(payload);
        v
    }

    #[test]
    fn test_decode_int_tag() {
        let raw = bytes_for(b'i', &2i32.to_le_bytes());
        let mut cursor = Cursor::new(&raw);
        let tags = decode_tags(&mut cursor);
        assert_eq!(tags.get(b"NM"), Some(&('i', Value::Int(2))));
    }

    #[test]
    fn test_decode_string_tag() {
        let mut raw = vec![b'R', b'G', b'Z'];
        raw.extend_from_slice(b"sample1\0");
        let mut cursor = Cursor::new(&raw);
        let tags = decode_tags(&mut cursor);
        assert_eq!(
            tags.get(b"RG"),
            Some(&('Z', Value::String("sample1".to_string())))
        );
    }

    #[test]
    fn test_decode_b_array_tag() {
        let mut raw = vec![b'X', b'A', b'B', b'i'];
        raw.extend_from_slice(&3u32.to_le_bytes());
        raw.extend_from_slice(&1i32.to_le_bytes());
        raw.extend_from_slice(&2i32.to_le_bytes());
        raw.extend_from_slice(&3i32.to_le_bytes());

        let mut cursor = Cursor::new(&raw);
        let tags = decode_tags(&mut cursor);
        assert_eq!(
            tags.get(b"XA"),
            Some(&('B', Value::Array(ArrayValue::Int('i', vec![1, 2, 3]))))
        );
    }

    #[test]
    fn test_decode_b_array_huge_count_does_not_preallocate_and_stops_cleanly() {
        // count claims 4 billion elements but no element data follows; this
        // must stop parsing gracefully (dropping the in-progress tag) rather
        // than attempt a huge up-front allocation.
        let mut raw = bytes_for(b'i', &2i32.to_le_bytes());
        raw.extend_from_slice(&[b'X', b'A', b'B', b'i']);
        raw.extend_from_slice(&u32::MAX.to_le_bytes());

        let mut cursor = Cursor::new(&raw);
        let tags = decode_tags(&mut cursor);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get(b"NM"), Some(&('i', Value::Int(2))));
        assert!(tags.get(b"XA").is_none());
    }

    #[test]
    fn test_unknown_type_stops_parsing_but_keeps_earlier_tags() {
        let mut raw = bytes_for(b'i', &2i32.to_le_bytes());
        raw.extend_from_slice(&[b'X', b'Y', b'?']);

        let mut cursor = Cursor::new(&raw);
        let tags = decode_tags(&mut cursor);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get(b"NM"), Some(&('i', Value::Int(2))));
    }
}
