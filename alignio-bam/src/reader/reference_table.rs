//! The BAM reference table: the `n_ref`-entry list immediately following the
//! header text, and its reconciliation with the text header's `@SQ` list.

use alignio_sam::header::Header;

use super::cursor::Cursor;

/// One binary reference-table entry: its name (NUL stripped) and length.
pub struct ReferenceSequence {
    pub name: String,
    pub l_ref: u32,
}

/// Reads the reference table: `n_ref` followed by `n_ref` `(l_name, name,
/// l_ref)` entries.
///
/// Returns `None` if the table is truncated — callers treat that the same
/// way as a truncated alignment stream: stop and keep nothing further.
pub fn read(cursor: &mut Cursor<'_>) -> Option<Vec<ReferenceSequence>> {
    let n_ref = cursor.u32_le()?;

    // Each entry is at least an `l_name` and an `l_ref` field (8 bytes); cap
    // the initial allocation against what's actually left so a corrupted or
    // truncated `n_ref` can't force a multi-gigabyte allocation up front.
    const MIN_ENTRY_LEN: usize = 8;
    let capacity = (n_ref as usize).min(cursor.remaining() / MIN_ENTRY_LEN);
    let mut table = Vec::with_capacity(capacity);

    for _ in 0..n_ref {
        let l_name = cursor.u32_le()? as usize;
        let raw_name = cursor.take(l_name)?;
        let l_ref = cursor.u32_le()?;

        let name = std::str::from_utf8(raw_name)
            .unwrap_or("")
            .trim_end_matches('\0')
            .to_string();

        table.push(ReferenceSequence { name, l_ref });
    }

    Some(table)
}

/// Appends any binary-table reference not already present in `header.sq`
/// (matched by `SN`), in binary-table order.
pub fn reconcile(header: &mut Header, table: &[ReferenceSequence]) {
    for entry in table {
        let already_present = header
            .sq
            .iter()
            .any(|fields| fields.get("SN").map(String::as_str) == Some(entry.name.as_str()));

        if !already_present {
            let mut fields = alignio_sam::header::Fields::new();
            fields.insert("SN".to_string(), entry.name.clone());
            fields.insert("LN".to_string(), entry.l_ref.to_string());
            header.sq.push(fields);
        }
    }
}
