//! Fixed-size binary records.
//!
//! Each record is exactly [`Format::size`] bytes. Fields are sliced out
//! verbatim; converted channel values are written in the little-endian
//! type of their storage kind.

use std::io::{ErrorKind, Read, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use colorcalc_core::StorageKind;

use crate::{FieldBytes, Format, IoError, IoResult, Record, RecordReader, RecordWriter, Value};

/// Reads binary records of a fixed format.
#[derive(Debug)]
pub struct BinaryReader<R> {
    inner: R,
    format: Format,
    buf: Vec<u8>,
    records: u64,
}

impl<R: Read> BinaryReader<R> {
    /// Creates a reader for `format`.
    pub fn new(inner: R, format: Format) -> Self {
        let buf = vec![0; format.size()];
        Self {
            inner,
            format,
            buf,
            records: 0,
        }
    }

    /// Record format.
    pub fn format(&self) -> &Format {
        &self.format
    }

    fn fill(&mut self) -> IoResult<usize> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> RecordReader for BinaryReader<R> {
    fn read_record(&mut self) -> IoResult<Option<Record>> {
        let filled = self.fill()?;
        if filled == 0 {
            return Ok(None);
        }
        self.records += 1;
        if filled < self.buf.len() {
            return Err(IoError::Truncated {
                record: self.records,
                expected: self.buf.len(),
                actual: filled,
            });
        }

        let mut offset = 0;
        let values = self
            .format
            .fields()
            .iter()
            .map(|&ty| {
                let bytes = FieldBytes::from_slice(&self.buf[offset..offset + ty.size()]);
                offset += ty.size();
                Value::Binary { ty, bytes }
            })
            .collect();
        Ok(Some(Record::new(values)))
    }
}

/// Writes binary records.
#[derive(Debug)]
pub struct BinaryWriter<W> {
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> BinaryWriter<W> {
    /// Creates a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::new(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

fn encode(buf: &mut Vec<u8>, value: f64, storage: StorageKind) -> std::io::Result<()> {
    // values are already rounded and clamped for integer storage
    match storage {
        StorageKind::U8 => buf.write_u8(value as u8),
        StorageKind::U16 => buf.write_u16::<LittleEndian>(value as u16),
        StorageKind::U32 => buf.write_u32::<LittleEndian>(value as u32),
        StorageKind::F32 => buf.write_f32::<LittleEndian>(value as f32),
        StorageKind::F64 => buf.write_f64::<LittleEndian>(value),
    }
}

impl<W: Write> RecordWriter for BinaryWriter<W> {
    fn write_record(&mut self, record: &Record) -> IoResult<()> {
        self.buf.clear();
        for value in record.values() {
            match value {
                Value::Binary { bytes, .. } => self.buf.extend_from_slice(bytes),
                Value::Number { value, storage } => encode(&mut self.buf, *value, *storage)?,
                Value::Text(s) => {
                    return Err(IoError::Encode(format!("text field '{s}' in binary output")));
                }
            }
        }
        self.inner.write_all(&self.buf)?;
        Ok(())
    }

    fn flush(&mut self) -> IoResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}
