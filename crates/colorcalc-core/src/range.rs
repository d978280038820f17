//! Numeric ranges and storage kinds for channel values.
//!
//! A [`Range`] describes the numeric domain a channel value is expressed in
//! (for example 0..255) together with the [`StorageKind`] that canonically
//! holds it. Range and storage are orthogonal in a conversion request: the
//! range picks the numeric scale, the storage picks how results are rounded
//! and encoded.
//!
//! # Canonical ranges
//!
//! | Token | Domain          | Storage  |
//! |-------|-----------------|----------|
//! | `ub`  | 0 to 255        | `u8`     |
//! | `uw`  | 0 to 65535      | `u16`    |
//! | `ui`  | 0 to 4294967295 | `u32`    |
//! | `f`   | 0 to 1          | `f32`    |
//! | `d`   | 0 to 1          | `f64`    |
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_core::{Range, StorageKind};
//!
//! let r = Range::parse("uw").unwrap();
//! assert_eq!(r.storage_kind(), StorageKind::U16);
//! assert_eq!(r.normalize(65535.0), 1.0);
//! assert_eq!(r.to_string(), "uw");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{Colorspace, CoreError, CoreResult};

/// Storage representation of a channel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 32-bit single-precision float.
    F32,
    /// 64-bit double-precision float.
    F64,
}

impl StorageKind {
    /// Whether this is a floating-point kind.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Whether this is an integer kind.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !self.is_float()
    }

    /// Largest representable value for integer kinds, `None` for floats.
    #[inline]
    pub const fn integer_max(&self) -> Option<f64> {
        match self {
            Self::U8 => Some(u8::MAX as f64),
            Self::U16 => Some(u16::MAX as f64),
            Self::U32 => Some(u32::MAX as f64),
            Self::F32 | Self::F64 => None,
        }
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric domain descriptor: `[domain_min, domain_max]` plus storage kind.
///
/// The five canonical ranges are available as associated constants and via
/// [`Range::parse`]. Custom float domains can be built with [`Range::new`];
/// they are validated by [`Range::validate`] before a conversion uses them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
    kind: StorageKind,
}

impl Range {
    /// 0 to 255, stored as `u8`.
    pub const UB: Self = Self::new(0.0, u8::MAX as f64, StorageKind::U8);
    /// 0 to 65535, stored as `u16`.
    pub const UW: Self = Self::new(0.0, u16::MAX as f64, StorageKind::U16);
    /// 0 to 4294967295, stored as `u32`.
    pub const UI: Self = Self::new(0.0, u32::MAX as f64, StorageKind::U32);
    /// 0 to 1, stored as `f32`.
    pub const F: Self = Self::new(0.0, 1.0, StorageKind::F32);
    /// 0 to 1, stored as `f64`.
    pub const D: Self = Self::new(0.0, 1.0, StorageKind::F64);

    /// All canonical ranges in token order.
    pub const ALL: [Self; 5] = [Self::UB, Self::UW, Self::UI, Self::F, Self::D];

    /// Creates a range without validating it.
    ///
    /// Use [`Range::validate`] to check the domain.
    #[inline]
    pub const fn new(min: f64, max: f64, kind: StorageKind) -> Self {
        Self { min, max, kind }
    }

    /// Parses one of the canonical tokens `ub`, `uw`, `ui`, `f`, `d`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidRangeToken`] for anything else, including
    /// differently cased spellings.
    pub fn parse(token: &str) -> CoreResult<Self> {
        match token {
            "ub" => Ok(Self::UB),
            "uw" => Ok(Self::UW),
            "ui" => Ok(Self::UI),
            "f" => Ok(Self::F),
            "d" => Ok(Self::D),
            _ => Err(CoreError::InvalidRangeToken(token.to_string())),
        }
    }

    /// Default range of a colorspace: rgb and ycbcr use `ub`, ypbpr uses `f`.
    ///
    /// The unknown colorspace reads values as plain doubles.
    #[inline]
    pub const fn default_for(space: Colorspace) -> Self {
        match space {
            Colorspace::Rgb | Colorspace::Ycbcr => Self::UB,
            Colorspace::Ypbpr => Self::F,
            Colorspace::None => Self::D,
        }
    }

    /// Returns the canonical token if this is one of the five canonical ranges.
    pub fn token(&self) -> Option<&'static str> {
        match *self {
            r if r == Self::UB => Some("ub"),
            r if r == Self::UW => Some("uw"),
            r if r == Self::UI => Some("ui"),
            r if r == Self::F => Some("f"),
            r if r == Self::D => Some("d"),
            _ => None,
        }
    }

    /// Lower bound of the domain.
    #[inline]
    pub const fn domain_min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the domain.
    #[inline]
    pub const fn domain_max(&self) -> f64 {
        self.max
    }

    /// Width of the domain.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Storage kind of the range.
    #[inline]
    pub const fn storage_kind(&self) -> StorageKind {
        self.kind
    }

    /// Whether values in this range are stored as integers.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        self.kind.is_integer()
    }

    /// Checks the domain invariants.
    ///
    /// - the domain must be finite and non-degenerate (`min < max`)
    /// - integer kinds must start at 0 and fit their storage
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidRange`] describing the violated invariant.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CoreError::invalid_range(self.min, self.max, "domain is not finite"));
        }
        if self.min >= self.max {
            return Err(CoreError::invalid_range(self.min, self.max, "domain is degenerate"));
        }
        if let Some(limit) = self.kind.integer_max() {
            if self.min != 0.0 {
                return Err(CoreError::invalid_range(
                    self.min,
                    self.max,
                    format!("{} domain must start at 0", self.kind),
                ));
            }
            if self.max > limit {
                return Err(CoreError::invalid_range(
                    self.min,
                    self.max,
                    format!("domain exceeds {} storage", self.kind),
                ));
            }
        }
        Ok(())
    }

    /// Maps a value in this domain onto `[0, 1]`.
    #[inline]
    pub fn normalize(&self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }

    /// Maps a `[0, 1]` value back into this domain.
    #[inline]
    pub fn denormalize(&self, v: f64) -> f64 {
        v * self.span() + self.min
    }
}

impl FromStr for Range {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token() {
            Some(token) => f.write_str(token),
            None => write!(f, "{}[{},{}]", self.kind, self.min, self.max),
        }
    }
}
