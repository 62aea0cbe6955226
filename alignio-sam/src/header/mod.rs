//! The SAM header: `@HD`, `@SQ`, `@RG`, `@PG`, and `@CO` lines.

use indexmap::IndexMap;

/// An untyped key-value mapping read from a single header line's tab
/// fields (e.g. one `@SQ` entry's `SN`/`LN`/... tags).
///
/// The SAM spec allows arbitrary two-character tag keys to appear on any
/// header line type, so this is deliberately schema-less pass-through
/// storage rather than a struct with named fields.
pub type Fields = IndexMap<String, String>;

/// The parsed SAM header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    /// The single `@HD` line's fields, if present.
    pub hd: Option<Fields>,
    /// Each `@SQ` line's fields, in source order. `@SQ` order defines the
    /// BAM reference-ID numbering.
    pub sq: Vec<Fields>,
    /// Each `@RG` line's fields, in source order.
    pub rg: Vec<Fields>,
    /// Each `@PG` line's fields, in source order.
    pub pg: Vec<Fields>,
    /// Each `@CO` line's comment text, in source order.
    pub co: Vec<String>,
}

impl Header {
    /// Returns the `SN` value of the `@SQ` entry named `name`, if any.
    pub fn reference_len(&self, name: &str) -> Option<&str> {
        self.sq
            .iter()
            .find(|fields| fields.get("SN").map(String::as_str) == Some(name))
            .and_then(|fields| fields.get("LN"))
            .map(String::as_str)
    }

    /// Returns the index of the `@SQ` entry named `name`, if any. This is
    /// the BAM `ref_id` for that reference.
    pub fn reference_index(&self, name: &str) -> Option<usize> {
        self.sq
            .iter()
            .position(|fields| fields.get("SN").map(String::as_str) == Some(name))
    }
}
