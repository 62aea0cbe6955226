//! Errors produced while decoding a BAM byte stream.

use std::{error, fmt, io};

/// An error while decoding the fixed BAM binary layout, prior to the
/// truncation-tolerant alignment loop (which never errors — it just stops).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// The first 4 bytes were not `BAM\x01`.
    InvalidMagic,
    /// The header text or reference table ended before the layout expects.
    Truncated,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagic => write!(f, "invalid BAM magic number"),
            Self::Truncated => write!(f, "truncated BAM header"),
        }
    }
}

impl error::Error for DecodeError {}

impl From<DecodeError> for io::Error {
    fn from(err: DecodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
