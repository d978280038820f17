//! Error types for color operations.
//!
//! Covers field inference, request resolution and pipeline dispatch.
//! Token and range errors from `colorcalc-core` are wrapped unchanged.

use colorcalc_core::CoreError;
use thiserror::Error;

/// Color operation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// Invalid range token, colorspace token or degenerate range.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Field names satisfy none of the candidate colorspaces.
    #[error("no colorspace matches fields: {candidates}")]
    NoColorspaceMatch {
        /// Comma-separated candidate colorspaces.
        candidates: String,
    },

    /// Field names satisfy more than one candidate colorspace.
    #[error("multiple colorspaces match fields: {matches}")]
    MultipleColorspaceMatches {
        /// Comma-separated matching colorspaces.
        matches: String,
    },

    /// Conversion cannot be built from the given parameters.
    #[error("unsupported conversion: {0}")]
    UnsupportedConversion(String),

    /// A canonical channel slot is absent from the field list.
    #[error("field list has no '{0}' channel")]
    MissingChannel(String),

    /// A canonical channel slot appears more than once in the field list.
    #[error("field list has duplicate '{0}' channel")]
    DuplicateChannel(String),
}

impl ColorError {
    /// Returns `true` for the two field inference ambiguity errors.
    #[inline]
    pub fn is_ambiguity(&self) -> bool {
        matches!(
            self,
            Self::NoColorspaceMatch { .. } | Self::MultipleColorspaceMatches { .. }
        )
    }

    /// Creates an [`ColorError::UnsupportedConversion`] error.
    #[inline]
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedConversion(msg.into())
    }
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
