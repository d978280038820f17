//! # colorcalc-core
//!
//! Core types for photometric colorspace conversion.
//!
//! This crate provides the descriptor model shared by every other colorcalc crate:
//!
//! - [`Range`] - Numeric domain of a channel value and its [`StorageKind`]
//! - [`Colorspace`] - Enumerated colorspace variants with canonical field names
//! - [`CoreError`] - Token and range validation errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. Every colorcalc crate except
//! `colorcalc-math` depends on `colorcalc-core`:
//!
//! ```text
//! colorcalc-core (this crate)
//!    ^
//!    |
//!    +-- colorcalc-color (algebra, dispatcher, field inference)
//!    +-- colorcalc-io (record streams)
//!    +-- colorcalc-cli
//! ```
//!
//! ## Example
//!
//! ```
//! use colorcalc_core::prelude::*;
//!
//! let space: Colorspace = "ycbcr".parse().unwrap();
//! assert_eq!(space.field_names(), &["y", "cb", "cr"]);
//! assert_eq!(space.default_range(), Range::UB);
//! assert_eq!(Range::parse("uw").unwrap().domain_max(), 65535.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod error;
pub mod range;

pub use colorspace::{ChannelKind, Colorspace};
pub use error::{CoreError, CoreResult};
pub use range::{Range, StorageKind};

/// Prelude module for convenient imports.
///
/// ```
/// use colorcalc_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colorspace::{ChannelKind, Colorspace};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::range::{Range, StorageKind};
}
