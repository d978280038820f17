//! # colorcalc-io
//!
//! Record streams for colorcalc: CSV and fixed-size binary records, and
//! the [`StreamProcessor`] that converts the channel fields of each record.
//!
//! ```text
//! RecordReader --> StreamProcessor --> RecordWriter
//!  CsvReader         (Converter,        CsvWriter
//!  BinaryReader       FieldMap)         BinaryWriter
//! ```
//!
//! Non-channel fields are never decoded: text stays text, bytes stay bytes.
//!
//! # Binary formats
//!
//! See [`format`] for the format string syntax, e.g. `s[10],3f,t`.

#![warn(missing_docs)]

pub mod binary;
pub mod csv;
pub mod error;
pub mod format;
pub mod processor;
pub mod record;
pub mod traits;

pub use binary::{BinaryReader, BinaryWriter};
pub use csv::{CsvReader, CsvWriter};
pub use error::{IoError, IoResult};
pub use format::{FieldType, Format};
pub use processor::{StreamProcessor, StreamStats, DEFAULT_BATCH_SIZE};
pub use record::{FieldBytes, Record, Value};
pub use traits::{RecordReader, RecordWriter};
