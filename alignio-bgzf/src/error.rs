use std::{error, fmt};

/// An error returned when a BGZF byte stream fails to decompress.
#[derive(Debug)]
pub enum DecodeError {
    /// Neither whole-stream decompression nor block-by-block scanning
    /// produced any output.
    Empty,
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no BGZF member could be decompressed"),
        }
    }
}

impl From<DecodeError> for std::io::Error {
    fn from(err: DecodeError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err)
    }
}
