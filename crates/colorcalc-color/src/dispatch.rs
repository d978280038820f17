//! Conversion dispatcher.
//!
//! Turns a [`ConversionSpec`] into a [`Converter`]: a fixed [`Pipeline`] of
//! input normalize, colorspace transform, output rescale and storage cast.
//!
//! # Unit domains
//!
//! Input values are first mapped linearly from their range onto `[0, 1]`.
//! YPbPr chroma is signed, so for integer ranges (offset binary) the chroma
//! channels are shifted down by 0.5 afterwards. Float YPbPr ranges already
//! carry signed chroma and are not shifted. Output reverses the same steps
//! for the destination.
//!
//! # Storage cast
//!
//! Integer storage rounds to nearest and clamps to the destination range.
//! Float storage keeps full precision and does not clamp.
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_color::dispatch;
//! use colorcalc_core::{Colorspace, Range};
//!
//! let conv = dispatch(Colorspace::Rgb, Range::UB, Colorspace::Ycbcr, Range::UB, None).unwrap();
//! assert_eq!(conv.apply([0.0, 0.0, 0.0]), [16.0, 128.0, 128.0]);
//! assert_eq!(conv.apply([255.0, 255.0, 255.0]), [235.0, 128.0, 128.0]);
//! ```

use std::fmt;

use colorcalc_core::{ChannelKind, Colorspace, Range, StorageKind};
use tracing::debug;

use crate::algebra::transform_ops;
use crate::{ColorError, ColorResult, Pipeline};

/// Fully resolved parameters of one conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionSpec {
    /// Source colorspace.
    pub from: Colorspace,
    /// Range source values are expressed in.
    pub from_range: Range,
    /// Destination colorspace.
    pub to: Colorspace,
    /// Range results are expressed in.
    pub to_range: Range,
    /// Storage results are cast to.
    pub storage: Range,
}

impl ConversionSpec {
    /// Creates a spec whose storage follows `to_range`.
    pub const fn new(from: Colorspace, from_range: Range, to: Colorspace, to_range: Range) -> Self {
        Self {
            from,
            from_range,
            to,
            to_range,
            storage: to_range,
        }
    }

    /// Replaces the storage range.
    pub const fn with_storage(mut self, storage: Range) -> Self {
        self.storage = storage;
        self
    }

    /// Checks colorspaces, ranges and storage compatibility.
    ///
    /// # Errors
    ///
    /// - [`ColorError::UnsupportedConversion`] for the `none` colorspace or
    ///   an integer storage that cannot hold `to_range`
    /// - [`ColorError::Core`] wrapping `InvalidRange` for a bad domain
    pub fn validate(&self) -> ColorResult<()> {
        if self.from.is_none() || self.to.is_none() {
            return Err(ColorError::unsupported(format!(
                "cannot convert from '{}' to '{}'",
                self.from, self.to
            )));
        }
        self.from_range.validate()?;
        self.to_range.validate()?;
        self.storage.validate()?;

        if self.storage.is_integer() {
            if !self.to_range.is_integer() {
                return Err(ColorError::unsupported(format!(
                    "{}: storage format cannot be an integer",
                    self.to_range
                )));
            }
            if self.storage != self.to_range {
                return Err(ColorError::unsupported(format!(
                    "storage format {} does not match range {}",
                    self.storage, self.to_range
                )));
            }
        }
        Ok(())
    }

    /// Builds the converter for this spec.
    pub fn dispatch(&self) -> ColorResult<Converter> {
        self.validate()?;

        let pipeline = input_normalize(self.from, self.from_range)
            .then(transform_ops(self.from, self.to)?)
            .then(output_rescale(self.to, self.to_range))
            .then(storage_cast(self.to_range, self.storage));

        debug!(spec = %self, ops = ?pipeline.ops(), "dispatched conversion");
        Ok(Converter {
            spec: *self,
            pipeline,
        })
    }
}

impl fmt::Display for ConversionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} -> {}/{} (storage {})",
            self.from, self.from_range, self.to, self.to_range, self.storage
        )
    }
}

/// Builds the converter for `(from, from_range) -> (to, to_range)`.
///
/// `storage` defaults to `to_range` when `None`.
///
/// # Errors
///
/// See [`ConversionSpec::validate`].
pub fn dispatch(
    from: Colorspace,
    from_range: Range,
    to: Colorspace,
    to_range: Range,
    storage: Option<Range>,
) -> ColorResult<Converter> {
    ConversionSpec::new(from, from_range, to, to_range)
        .with_storage(storage.unwrap_or(to_range))
        .dispatch()
}

/// Every supported conversion, one `from/range,to/range` line each.
pub fn list() -> Vec<String> {
    Colorspace::supported_conversions()
        .into_iter()
        .map(|(from, from_range, to, to_range)| format!("{from}/{from_range},{to}/{to_range}"))
        .collect()
}

/// Offset applied to reach the signed chroma of YPbPr from an unsigned range.
fn chroma_shift(space: Colorspace, range: Range) -> [f64; 3] {
    if space != Colorspace::Ypbpr || !range.is_integer() {
        return [0.0; 3];
    }
    space
        .channel_kinds()
        .map(|kind| if kind == ChannelKind::Chroma { 0.5 } else { 0.0 })
}

fn input_normalize(space: Colorspace, range: Range) -> Pipeline {
    let mut ops = Pipeline::new();
    if range.domain_min() != 0.0 {
        ops = ops.offset([-range.domain_min(); 3]);
    }
    if range.span() != 1.0 {
        ops = ops.scale([1.0 / range.span(); 3]);
    }
    let shift = chroma_shift(space, range);
    if shift != [0.0; 3] {
        ops = ops.offset(shift.map(|s| -s));
    }
    ops
}

fn output_rescale(space: Colorspace, range: Range) -> Pipeline {
    let mut ops = Pipeline::new();
    let shift = chroma_shift(space, range);
    if shift != [0.0; 3] {
        ops = ops.offset(shift);
    }
    if range.span() != 1.0 {
        ops = ops.scale([range.span(); 3]);
    }
    if range.domain_min() != 0.0 {
        ops = ops.offset([range.domain_min(); 3]);
    }
    ops
}

fn storage_cast(to_range: Range, storage: Range) -> Pipeline {
    if !storage.is_integer() {
        return Pipeline::new();
    }
    Pipeline::new()
        .round()
        .clamp([to_range.domain_min(); 3], [to_range.domain_max(); 3])
}

/// A dispatched, reusable conversion function.
///
/// Holds no mutable state; share it freely across worker threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Converter {
    spec: ConversionSpec,
    pipeline: Pipeline,
}

impl Converter {
    /// Converts one channel triplet.
    #[inline]
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        self.pipeline.apply(v)
    }

    /// The spec this converter was built from.
    pub fn spec(&self) -> &ConversionSpec {
        &self.spec
    }

    /// Storage kind of converted values.
    pub fn storage(&self) -> StorageKind {
        self.spec.storage.storage_kind()
    }

    /// The underlying operations.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}
