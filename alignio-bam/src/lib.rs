//! Binary Alignment/Map (BAM) format decoding.

mod error;
mod reader;

pub use error::DecodeError;
pub use reader::read;
