//! 3x3 matrix type for luma/chroma transforms.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_math::{Mat3, Vec3};
//!
//! let m = Mat3::from_rows([[2.0, 0.0, 0.0], [0.0, 3.0, 1.0], [0.0, 0.0, 4.0]]);
//! let inv = m.inverse().unwrap();
//! let v = inv * (m * Vec3::new(1.0, 2.0, 3.0));
//! assert!(v.max_abs_diff(Vec3::new(1.0, 2.0, 3.0)) < 1e-12);
//! ```

use crate::Vec3;
use std::ops::{Index, Mul};

/// Determinants below this magnitude are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A 3x3 matrix for channel transforms.
///
/// Stored in row-major order. Use [`Mat3::from_rows`] to construct from
/// component arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Computes the inverse of this matrix.
    ///
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let g = self.to_glam();
        if g.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(Self::from_glam(g.inverse()))
    }

    /// Transforms a Vec3 by this matrix.
    ///
    /// Equivalent to `matrix * vector`.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        let [r0, r1, r2] = self.m.map(Vec3::from_array);
        Vec3::new(r0.dot(v), r1.dot(v), r2.dot(v))
    }

    /// Largest absolute element difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Converts to glam DMat3 (column-major).
    #[inline]
    fn to_glam(self) -> glam::DMat3 {
        // glam uses column-major, so we transpose
        glam::DMat3::from_cols_array_2d(&[
            [self.m[0][0], self.m[1][0], self.m[2][0]],
            [self.m[0][1], self.m[1][1], self.m[2][1]],
            [self.m[0][2], self.m[1][2], self.m[2][2]],
        ])
    }

    #[inline]
    fn from_glam(m: glam::DMat3) -> Self {
        let c = m.to_cols_array_2d();
        Self::from_rows([
            [c[0][0], c[1][0], c[2][0]],
            [c[0][1], c[1][1], c[2][1]],
            [c[0][2], c[1][2], c[2][2]],
        ])
    }
}

// Mat3 * Vec3
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

// Mat3 * Mat3
impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam() * rhs.to_glam())
    }
}

impl Index<usize> for Mat3 {
    type Output = [f64; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f64; 3] {
        &self.m[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mat3_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat3::IDENTITY * v, v);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let inv = m.inverse().unwrap();
        assert!((m * inv).max_abs_diff(&Mat3::IDENTITY) < 1e-12);
        assert_abs_diff_eq!(inv[0][0], -24.0, epsilon = 1e-9);
        assert_abs_diff_eq!(inv[0][1], 18.0, epsilon = 1e-9);
        assert_abs_diff_eq!(inv[0][2], 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mat3_singular() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_mat3_glam_roundtrip() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(Mat3::from_glam(m.to_glam()), m);
        assert_eq!(m * Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 5.0, 8.0));
    }

    #[test]
    fn test_mat3_mul() {
        let a = Mat3::from_rows([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]);
        let b = Mat3::from_rows([[3.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.5]]);
        assert_eq!(a * b, Mat3::from_rows([[6.0, 2.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]]));
    }
}
