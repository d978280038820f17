//! Error types for colorcalc-core operations.
//!
//! Token parsing and range validation are the only fallible operations in
//! this crate. Higher-level crates wrap [`CoreError`] in their own error
//! enums via `#[from]`.
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_core::{CoreError, Range};
//!
//! let err = Range::parse("half").unwrap_err();
//! assert!(matches!(err, CoreError::InvalidRangeToken(_)));
//! assert!(err.to_string().contains("half"));
//! ```

use thiserror::Error;

/// Result type alias using [`CoreError`] as the error type.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised while parsing or validating core descriptors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Range token is not one of `ub`, `uw`, `ui`, `f`, `d`.
    #[error("invalid range '{0}', expected one of: ub, uw, ui, f, d")]
    InvalidRangeToken(String),

    /// Colorspace token is not one of `rgb`, `ycbcr`, `ypbpr`.
    ///
    /// [`crate::Colorspace::parse`] itself never fails; this is raised by
    /// callers that require a real colorspace, such as a destination.
    #[error("invalid colorspace '{0}', expected one of: rgb, ycbcr, ypbpr")]
    InvalidColorspaceToken(String),

    /// Numeric domain is degenerate or inconsistent with its storage kind.
    #[error("invalid range [{min}, {max}]: {reason}")]
    InvalidRange {
        /// Lower bound of the domain
        min: f64,
        /// Upper bound of the domain
        max: f64,
        /// Why the domain was rejected
        reason: String,
    },
}

impl CoreError {
    /// Creates an [`CoreError::InvalidRange`] error.
    #[inline]
    pub fn invalid_range(min: f64, max: f64, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            min,
            max,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message() {
        let err = CoreError::invalid_range(5.0, 5.0, "empty domain");
        let msg = err.to_string();
        assert!(msg.contains("[5, 5]"));
        assert!(msg.contains("empty domain"));
    }

    #[test]
    fn test_token_messages() {
        let msg = CoreError::InvalidColorspaceToken("hsv".into()).to_string();
        assert!(msg.contains("'hsv'"));
        assert!(msg.contains("rgb, ycbcr, ypbpr"));
    }
}
