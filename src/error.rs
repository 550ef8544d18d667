//! Decode errors: one flat enum, `std::error::Error` and `fmt::Display`
//! implemented by hand, and `From` impls for the upstream error types
//! wrapped transparently.

use std::fmt;

/// Everything that can go wrong while decoding a FIT stream, plus a
/// transparent `Io` variant for failures reading the underlying source.
#[derive(Debug)]
pub enum Error {
    /// Fewer bytes were available than a record or segment demanded.
    TruncatedInput { expected: usize, available: usize },
    /// File-header signature was not `.FIT`.
    BadSignature([u8; 4]),
    /// File-header first byte was neither 12 nor 14.
    BadHeaderSize(u8),
    /// Computed CRC disagreed with the trailer, for the segment starting
    /// at `segment_offset`.
    CrcMismatch { expected: u16, computed: u16, segment_offset: u64 },
    /// A data record referenced a local tag with no prior definition.
    UnknownLocalTag(u8),
    /// Declared field sizes were inconsistent with the base type's size
    /// in a way that can't be reconciled (not a multiple of it).
    InvalidDefinition { field_definition_number: u8, size: u8, base_type_size: u8 },
    /// A processor hook failed.
    ProcessorError(String),
    /// Wrapped I/O failure reading the source.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TruncatedInput { expected, available } => write!(
                f,
                "truncated input: needed {} bytes, only {} available",
                expected, available
            ),
            Error::BadSignature(sig) => write!(
                f,
                "bad file signature: {:?} (expected .FIT)",
                String::from_utf8_lossy(sig)
            ),
            Error::BadHeaderSize(size) => {
                write!(f, "bad header size {} (expected 12 or 14)", size)
            }
            Error::CrcMismatch { expected, computed, segment_offset } => write!(
                f,
                "CRC mismatch in segment at offset {}: expected {:#06x}, computed {:#06x}",
                segment_offset, expected, computed
            ),
            Error::UnknownLocalTag(tag) => {
                write!(f, "data record referenced undefined local tag {}", tag)
            }
            Error::InvalidDefinition { field_definition_number, size, base_type_size } => write!(
                f,
                "field {} declares size {} which is not reconcilable with base type size {}",
                field_definition_number, size, base_type_size
            ),
            Error::ProcessorError(msg) => write!(f, "processor error: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
