//! Error types for format operations

use std::str::Utf8Error;
use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Input bytes were not valid UTF-8
    #[error(transparent)]
    TextDecode(#[from] TextDecodeError),
}

/// The input byte buffer could not be decoded as UTF-8.
///
/// Fatal to the single call that produced it; the converter itself holds no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input is not valid UTF-8 (valid up to byte {valid_up_to})")]
pub struct TextDecodeError {
    /// Length of the longest valid UTF-8 prefix
    pub valid_up_to: usize,
    /// Length of the offending sequence, `None` if the input ended mid-sequence
    pub error_len: Option<usize>,
}

impl From<Utf8Error> for TextDecodeError {
    fn from(err: Utf8Error) -> Self {
        TextDecodeError {
            valid_up_to: err.valid_up_to(),
            error_len: err.error_len(),
        }
    }
}

/// Decode a host byte buffer into text.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, TextDecodeError> {
    std::str::from_utf8(bytes).map_err(TextDecodeError::from)
}
