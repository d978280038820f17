//! Record stream processor.
//!
//! Reads records, converts the three channel fields of each with a
//! dispatched [`Converter`], and writes every record back in input order.
//! All other fields are passed through untouched.
//!
//! Records are independent, so each batch is converted in parallel with
//! rayon and then written sequentially.
//!
//! # Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use colorcalc_color::ConversionRequest;
//! use colorcalc_io::{CsvReader, CsvWriter, StreamProcessor};
//!
//! let request = ConversionRequest {
//!     from: Some("rgb,ub".into()),
//!     to: Some("rgb,uw".into()),
//!     ..Default::default()
//! };
//! let resolved = request.resolve().unwrap();
//! let processor = StreamProcessor::new(resolved.converter().unwrap(), resolved.field_map().unwrap());
//!
//! let mut reader = CsvReader::new(Cursor::new("255,0,1\n"), ',');
//! let mut writer = CsvWriter::new(Vec::new(), ',');
//! let stats = processor.run(&mut reader, &mut writer).unwrap();
//! assert_eq!(stats.records, 1);
//! assert_eq!(writer.into_inner(), b"65535,0,257\n");
//! ```

use colorcalc_color::{Converter, FieldMap};
use colorcalc_core::Colorspace;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{IoError, IoResult, Record, RecordReader, RecordWriter, Value};

/// Records converted per parallel batch.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Summary of a processed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Records converted and written.
    pub records: u64,
}

/// Applies a converter to the channel fields of every record.
#[derive(Debug, Clone)]
pub struct StreamProcessor {
    converter: Converter,
    fields: FieldMap,
    batch_size: usize,
    flush: bool,
}

impl StreamProcessor {
    /// Creates a processor.
    pub fn new(converter: Converter, fields: FieldMap) -> Self {
        Self {
            converter,
            fields,
            batch_size: DEFAULT_BATCH_SIZE,
            flush: false,
        }
    }

    /// Flushes the writer after every record; implies a batch size of one.
    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        if flush {
            self.batch_size = 1;
        }
        self
    }

    /// Sets the number of records converted per batch.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        if !self.flush {
            self.batch_size = batch_size.max(1);
        }
        self
    }

    /// The converter applied to each record.
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Converts the channel fields of one record in place.
    ///
    /// `record_no` is the 1-based record number used in error messages.
    /// Channel values must be finite numbers; `nan` and `inf` are parse errors.
    pub fn convert_record(&self, record: &mut Record, record_no: u64) -> IoResult<()> {
        if record.len() < self.fields.width() {
            return Err(IoError::MissingField {
                record: record_no,
                expected: self.fields.width(),
                actual: record.len(),
            });
        }

        let channels = self.fields.channels();
        let mut triplet = [0.0; 3];
        for (slot, &index) in channels.iter().enumerate() {
            let value = record.get(index).ok_or(IoError::MissingField {
                record: record_no,
                expected: self.fields.width(),
                actual: record.len(),
            })?;
            let parsed = value.as_f64().filter(|v| v.is_finite());
            triplet[slot] = parsed.ok_or_else(|| IoError::Parse {
                record: record_no,
                field: Colorspace::None.field_names()[slot].to_string(),
                value: value.to_string(),
            })?;
        }

        let out = self.converter.apply(triplet);
        let storage = self.converter.storage();
        for (slot, &index) in channels.iter().enumerate() {
            record.set(
                index,
                Value::Number {
                    value: out[slot],
                    storage,
                },
            );
        }
        Ok(())
    }

    /// Converts every record from `reader` into `writer`.
    ///
    /// Stops at the first record that fails; records before it are written.
    pub fn run<R, W>(&self, reader: &mut R, writer: &mut W) -> IoResult<StreamStats>
    where
        R: RecordReader + ?Sized,
        W: RecordWriter + ?Sized,
    {
        let mut stats = StreamStats::default();
        let mut batch: Vec<Record> = Vec::with_capacity(self.batch_size);

        loop {
            batch.clear();
            let mut exhausted = false;
            while batch.len() < self.batch_size {
                match reader.read_record()? {
                    Some(record) => batch.push(record),
                    None => {
                        exhausted = true;
                        break;
                    }
                }
            }
            if batch.is_empty() {
                break;
            }

            let base = stats.records + 1;
            let failed = self.convert_batch(&mut batch, base);
            let ok = failed.as_ref().map_or(batch.len(), |(i, _)| *i);

            for record in &batch[..ok] {
                writer.write_record(record)?;
                if self.flush {
                    writer.flush()?;
                }
            }
            stats.records += ok as u64;
            trace!(records = ok, total = stats.records, "batch written");

            if let Some((_, err)) = failed {
                writer.flush()?;
                return Err(err);
            }
            if exhausted {
                break;
            }
        }

        writer.flush()?;
        debug!(records = stats.records, "stream complete");
        Ok(stats)
    }

    /// Converts a batch, returning the first failure in input order.
    fn convert_batch(&self, batch: &mut [Record], base: u64) -> Option<(usize, IoError)> {
        if let [record] = batch {
            return self.convert_record(record, base).err().map(|e| (0, e));
        }
        batch
            .par_iter_mut()
            .enumerate()
            .map(|(i, record)| self.convert_record(record, base + i as u64).map_err(|e| (i, e)))
            .collect::<Vec<_>>()
            .into_iter()
            .find_map(Result::err)
    }
}
