//! # colorcalc-math
//!
//! Double-precision math primitives for colorspace transforms.
//!
//! - [`Mat3`] - 3x3 matrices for luma/chroma transforms
//! - [`Vec3`] - 3-component vectors for channel triplets
//!
//! # Design
//!
//! Matrix inversion and products go through `glam`'s `f64` types.
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Conversions run in `f64` throughout so that 32-bit integer ranges keep
//! their full precision.
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_math::{Mat3, Vec3};
//!
//! let luma = Mat3::from_rows([
//!     [0.299, 0.587, 0.114],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0],
//! ]);
//! let v = luma * Vec3::new(1.0, 1.0, 1.0);
//! assert!((v.x - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
mod vec3;

pub use mat3::*;
pub use vec3::*;
