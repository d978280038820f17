//! # colorcalc-color
//!
//! Colorspace conversion engine for channel triplets.
//!
//! - [`algebra`] - BT.601 RGB/YPbPr/YCbCr transforms in canonical unit domains
//! - [`Pipeline`] - explicit list of scale, offset, matrix, round and clamp ops
//! - [`dispatch()`] - builds a [`Converter`] for one [`ConversionSpec`]
//! - [`inference`] - colorspace inference from record field names
//! - [`ConversionRequest`] - resolves raw option tokens into a spec
//!
//! # Architecture
//!
//! ```text
//!              colorcalc-color
//!                    |
//!       +------------+------------+
//!       |                         |
//! colorcalc-math           colorcalc-core
//!   (Mat3, Vec3)     (Colorspace, Range, CoreError)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use colorcalc_color::{dispatch, ConversionRequest};
//! use colorcalc_core::{Colorspace, Range};
//!
//! // from raw options
//! let request = ConversionRequest {
//!     from: Some("rgb".into()),
//!     to: Some("ypbpr,d".into()),
//!     ..Default::default()
//! };
//! let conv = request.resolve().unwrap().converter().unwrap();
//! let ypbpr = conv.apply([255.0, 255.0, 255.0]);
//! assert!((ypbpr[0] - 1.0).abs() < 1e-12);
//!
//! // or directly
//! let conv = dispatch(Colorspace::Ypbpr, Range::D, Colorspace::Rgb, Range::UB, None).unwrap();
//! assert_eq!(conv.apply([1.0, 0.0, 0.0]), [255.0, 255.0, 255.0]);
//! ```
//!
//! Every conversion is a composition of four stages:
//!
//! 1. input normalize from the source range
//! 2. colorspace transform (see [`algebra`])
//! 3. output rescale into the destination range
//! 4. storage cast: round and clamp for integer storage only

#![warn(missing_docs)]

pub mod algebra;
pub mod dispatch;
pub mod error;
pub mod inference;
pub mod pipeline;
pub mod request;

pub use dispatch::{dispatch, list, ConversionSpec, Converter};
pub use error::{ColorError, ColorResult};
pub use inference::FieldMap;
pub use pipeline::{Pipeline, TransformOp};
pub use request::{Conflict, ConversionRequest, ResolvedConversion};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dispatch::{dispatch, ConversionSpec, Converter};
    pub use crate::error::{ColorError, ColorResult};
    pub use crate::inference::FieldMap;
    pub use crate::request::ConversionRequest;
    pub use colorcalc_core::{Colorspace, Range, StorageKind};
}
