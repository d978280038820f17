//! Error types for record stream operations.

use std::io;

use colorcalc_color::ColorError;
use thiserror::Error;

/// Record stream error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Conversion setup failed.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Binary format string or field layout is invalid.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Stream ended inside a binary record.
    #[error("record {record}: truncated, expected {expected} bytes, got {actual}")]
    Truncated {
        /// 1-based record number.
        record: u64,
        /// Record size in bytes.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// Record has fewer fields than declared.
    #[error("record {record}: expected {expected} fields, got {actual}")]
    MissingField {
        /// 1-based record number.
        record: u64,
        /// Declared field count.
        expected: usize,
        /// Fields present.
        actual: usize,
    },

    /// Channel value is not a number.
    #[error("record {record}: field '{field}': cannot read '{value}' as a number")]
    Parse {
        /// 1-based record number.
        record: u64,
        /// Field name.
        field: String,
        /// Offending value.
        value: String,
    },

    /// Value cannot be written in the output encoding.
    #[error("encode error: {0}")]
    Encode(String),
}

/// Result type for record stream operations.
pub type IoResult<T> = Result<T, IoError>;
