//! Channel transformation pipeline.
//!
//! A pipeline is a sequence of operations that transform a channel triplet.
//! The dispatcher assembles one per conversion in this order:
//!
//! 1. Input normalize (offset/scale from the source range)
//! 2. Colorspace transform (matrix and/or affine ops)
//! 3. Output rescale (scale/offset into the destination range)
//! 4. Storage cast (round and clamp, integer storage only)
//!
//! # Example
//!
//! ```rust
//! use colorcalc_color::Pipeline;
//!
//! // 0..255 -> 0..1 -> 0..65535, rounded
//! let pipeline = Pipeline::new()
//!     .scale([1.0 / 255.0; 3])
//!     .scale([65535.0; 3])
//!     .round()
//!     .clamp([0.0; 3], [65535.0; 3]);
//!
//! assert_eq!(pipeline.apply([255.0, 0.0, 1.0]), [65535.0, 0.0, 257.0]);
//! ```

use colorcalc_math::{Mat3, Vec3};

/// A single operation in the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    /// Per-channel scale.
    ///
    /// `[a', b', c'] = [a*s[0], b*s[1], c*s[2]]`
    Scale([f64; 3]),

    /// Per-channel offset.
    ///
    /// `[a', b', c'] = [a+o[0], b+o[1], c+o[2]]`
    Offset([f64; 3]),

    /// 3x3 matrix transform.
    ///
    /// Applied as: `[a', b', c'] = M * [a, b, c]`
    Matrix(Mat3),

    /// Round each channel to the nearest integer.
    Round,

    /// Clamp to range.
    Clamp {
        /// Minimum value per channel.
        min: [f64; 3],
        /// Maximum value per channel.
        max: [f64; 3],
    },
}

impl TransformOp {
    /// Applies this operation to one triplet.
    #[inline]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        match self {
            Self::Scale(s) => v.mul_elem(Vec3::from_array(*s)),
            Self::Offset(o) => v + Vec3::from_array(*o),
            Self::Matrix(m) => m.transform(v),
            Self::Round => v.round(),
            Self::Clamp { min, max } => v.clamp(Vec3::from_array(*min), Vec3::from_array(*max)),
        }
    }
}

/// A channel transformation pipeline.
///
/// Operations are applied in order, left to right. Pipelines hold no
/// mutable state, so one instance can be shared across threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    ops: Vec<TransformOp>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Adds an operation to the pipeline.
    pub fn push(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Appends all operations of another pipeline.
    pub fn then(mut self, other: Pipeline) -> Self {
        self.ops.extend(other.ops);
        self
    }

    /// Adds a matrix transform.
    pub fn matrix(self, m: Mat3) -> Self {
        self.push(TransformOp::Matrix(m))
    }

    /// Adds a scale operation.
    pub fn scale(self, s: [f64; 3]) -> Self {
        self.push(TransformOp::Scale(s))
    }

    /// Adds an offset operation.
    pub fn offset(self, o: [f64; 3]) -> Self {
        self.push(TransformOp::Offset(o))
    }

    /// Adds a rounding operation.
    pub fn round(self) -> Self {
        self.push(TransformOp::Round)
    }

    /// Adds a clamp operation.
    pub fn clamp(self, min: [f64; 3], max: [f64; 3]) -> Self {
        self.push(TransformOp::Clamp { min, max })
    }

    /// Returns the number of operations in the pipeline.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the operations in the pipeline.
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Applies the pipeline to a triplet.
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        self.ops
            .iter()
            .fold(Vec3::from_array(v), |acc, op| op.apply(acc))
            .to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = Pipeline::new();
        let v = [0.5, 0.3, 0.2];
        assert_eq!(pipeline.apply(v), v);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_scale_offset() {
        let pipeline = Pipeline::new().scale([2.0, 2.0, 2.0]).offset([0.1, 0.1, 0.1]);
        let result = pipeline.apply([0.5, 0.3, 0.2]);
        assert!((result[0] - 1.1).abs() < 1e-12);
        assert!((result[1] - 0.7).abs() < 1e-12);
        assert!((result[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_roundtrip() {
        let m = Mat3::from_rows([[2.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.5, 1.0]]);
        let pipeline = Pipeline::new()
            .matrix(m)
            .matrix(m.inverse().unwrap());
        let result = pipeline.apply([0.5, 0.3, 0.2]);
        assert!(Vec3::from(result).max_abs_diff(Vec3::new(0.5, 0.3, 0.2)) < 1e-12);
    }

    #[test]
    fn test_round_clamp() {
        let pipeline = Pipeline::new().round().clamp([0.0; 3], [255.0; 3]);
        assert_eq!(pipeline.apply([-7.6, 127.5, 300.4]), [0.0, 128.0, 255.0]);
    }

    #[test]
    fn test_then() {
        let a = Pipeline::new().scale([2.0; 3]);
        let b = Pipeline::new().offset([1.0; 3]);
        let c = a.then(b);
        assert_eq!(c.len(), 2);
        assert_eq!(c.apply([1.0, 2.0, 3.0]), [3.0, 5.0, 7.0]);
    }
}
