//! Genomic region expressions, resolved against a SAM header's `@SQ` list.

use std::{error, fmt, num, str::FromStr};

use alignio_sam::header::Header;

const MIN_POSITION: u64 = 1;

static UNMAPPED_NAME: &str = "*";
static ALL_NAME: &str = ".";

/// A genomic region.
///
/// Genomic regions can either be mapped to a reference sequence, unmapped
/// (`*`), or an inclusion of all reads (`.`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Region {
    Mapped {
        name: String,
        start: u64,
        end: Option<u64>,
    },
    Unmapped,
    All,
}

impl Region {
    /// Parses a string to a region, resolving its end position (when
    /// omitted) against the `@SQ` entry named by the region in `header`.
    ///
    /// A region string is `<reference-sequence-name>[:<start>[-<end>]]`.
    /// The name may be `*` for unmapped records or `.` for all records;
    /// otherwise it must name an `@SQ` entry in `header`.
    pub fn from_str_header(s: &str, header: &Header) -> Result<Self, ParseError> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        } else if s == UNMAPPED_NAME {
            return Ok(Self::Unmapped);
        } else if s == ALL_NAME {
            return Ok(Self::All);
        }

        if let Some(i) = s.rfind(':') {
            let suffix = &s[i + 1..];

            if let Ok((start, end)) = parse_interval(suffix) {
                let prefix = &s[0..i];

                if let Some(len) = reference_len(header, prefix) {
                    if header.reference_index(s).is_some() {
                        return Err(ParseError::Ambiguous);
                    }

                    let resolved_end = end.unwrap_or(len);
                    return Ok(Region::mapped(prefix, start, Some(resolved_end)));
                }
            }
        }

        if let Some(len) = reference_len(header, s) {
            Ok(Region::mapped(s, MIN_POSITION, Some(len)))
        } else {
            Err(ParseError::Invalid)
        }
    }

    /// Creates a new mapped region.
    ///
    /// `start` and `end` are 1-based. When `end` is `None`, the region is
    /// unbounded — it runs to the end of the named reference sequence.
    pub fn mapped<I>(name: I, start: u64, end: Option<u64>) -> Region
    where
        I: Into<String>,
    {
        Region::Mapped {
            name: name.into(),
            start,
            end,
        }
    }

    /// Returns the reference name of the region (`*` if unmapped, `.` if
    /// all).
    pub fn name(&self) -> &str {
        match self {
            Self::Mapped { name, .. } => name,
            Self::Unmapped => UNMAPPED_NAME,
            Self::All => ALL_NAME,
        }
    }

    /// Resolves the region against `header`'s `@SQ` list.
    ///
    /// Returns `(<index into header.sq>, <resolved end>)` for a mapped
    /// region whose name is present in the header; `None` otherwise.
    pub fn resolve(&self, header: &Header) -> Option<(usize, u64)> {
        match self {
            Self::Mapped { name, end, .. } => {
                let index = header.reference_index(name)?;
                let len = reference_len(header, name).unwrap_or(u64::MAX);
                Some((index, end.unwrap_or(len)))
            }
            Self::Unmapped | Self::All => None,
        }
    }
}

fn reference_len(header: &Header, name: &str) -> Option<u64> {
    header.reference_len(name)?.parse().ok()
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapped { name, start, end } => {
                write!(f, "{name}:{start}")?;

                if let Some(e) = end {
                    write!(f, "-{e}")?;
                }

                Ok(())
            }
            Self::Unmapped => write!(f, "{UNMAPPED_NAME}"),
            Self::All => write!(f, "{ALL_NAME}"),
        }
    }
}

/// An error returned when a region string fails to parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    Empty,
    Ambiguous,
    Invalid,
    MissingReferenceSequenceName,
    InvalidStartPosition(num::ParseIntError),
    InvalidEndPosition(num::ParseIntError),
}

impl error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty input"),
            Self::Ambiguous => f.write_str("ambiguous input"),
            Self::Invalid => f.write_str("invalid input"),
            Self::MissingReferenceSequenceName => write!(f, "invalid region"),
            Self::InvalidStartPosition(e) => write!(f, "invalid start position: {e}"),
            Self::InvalidEndPosition(e) => write!(f, "invalid end position: {e}"),
        }
    }
}

impl FromStr for Region {
    type Err = ParseError;

    /// Parses a string to a region without reference-length resolution: an
    /// omitted end position stays unbounded (`None`) rather than being
    /// filled in from a header. Use [`Region::from_str_header`] to resolve
    /// against an `@SQ` list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNMAPPED_NAME {
            return Ok(Self::Unmapped);
        } else if s == ALL_NAME {
            return Ok(Self::All);
        }

        let mut components = s.split([':', '-']);

        let name = components
            .next()
            .map(|t| t.into())
            .ok_or(ParseError::MissingReferenceSequenceName)?;

        let start = match components.next() {
            Some(t) => t.parse().map_err(ParseError::InvalidStartPosition)?,
            None => MIN_POSITION,
        };

        let end = match components.next() {
            Some(t) => t.parse().map(Some).map_err(ParseError::InvalidEndPosition)?,
            None => None,
        };

        Ok(Self::Mapped { name, start, end })
    }
}

fn parse_interval(s: &str) -> Result<(u64, Option<u64>), ParseError> {
    let mut components = s.splitn(2, '-');

    let start = match components.next() {
        Some(t) => t.parse().map_err(ParseError::InvalidStartPosition)?,
        None => MIN_POSITION,
    };

    let end = match components.next() {
        Some(t) => t.parse().map(Some).map_err(ParseError::InvalidEndPosition)?,
        None => None,
    };

    Ok((start, end))
}
