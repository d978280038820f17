//! Record reader and writer traits.
//!
//! Implement these to add a record encoding. The stream processor is
//! generic over both, so CSV and binary streams share one conversion loop.

use crate::{IoResult, Record};

/// Source of records.
pub trait RecordReader {
    /// Reads the next record, or `None` at end of stream.
    fn read_record(&mut self) -> IoResult<Option<Record>>;
}

/// Sink for records.
pub trait RecordWriter {
    /// Writes one record.
    fn write_record(&mut self, record: &Record) -> IoResult<()>;

    /// Flushes buffered output.
    fn flush(&mut self) -> IoResult<()>;
}

impl<R: RecordReader + ?Sized> RecordReader for Box<R> {
    fn read_record(&mut self) -> IoResult<Option<Record>> {
        (**self).read_record()
    }
}

impl<W: RecordWriter + ?Sized> RecordWriter for Box<W> {
    fn write_record(&mut self, record: &Record) -> IoResult<()> {
        (**self).write_record(record)
    }

    fn flush(&mut self) -> IoResult<()> {
        (**self).flush()
    }
}
