//! Delimited text records.
//!
//! One line per record. Lines are split on the delimiter outside double
//! quotes; fields keep their quotes so they are written back verbatim.
//! A trailing `\r` is dropped and blank lines are skipped.
//!
//! # Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use colorcalc_io::{CsvReader, RecordReader};
//!
//! let mut reader = CsvReader::new(Cursor::new("a,\"b,c\",3\r\n\n"), ',');
//! let record = reader.read_record().unwrap().unwrap();
//! assert_eq!(record.len(), 3);
//! assert_eq!(record.get(1).unwrap().to_string(), "\"b,c\"");
//! assert!(reader.read_record().unwrap().is_none());
//! ```

use std::io::{BufRead, Write};

use crate::{IoError, IoResult, Record, RecordReader, RecordWriter, Value};

/// Reads delimited text records.
#[derive(Debug)]
pub struct CsvReader<R> {
    inner: R,
    delimiter: char,
    line: String,
}

impl<R: BufRead> CsvReader<R> {
    /// Creates a reader splitting on `delimiter`.
    pub fn new(inner: R, delimiter: char) -> Self {
        Self {
            inner,
            delimiter,
            line: String::new(),
        }
    }
}

impl<R: BufRead> RecordReader for CsvReader<R> {
    fn read_record(&mut self) -> IoResult<Option<Record>> {
        loop {
            self.line.clear();
            if self.inner.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let line = self.line.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }
            let values = split_line(line, self.delimiter)
                .into_iter()
                .map(|f| Value::Text(f.to_string()))
                .collect::<Vec<_>>();
            return Ok(Some(Record::new(values)));
        }
    }
}

/// Splits on `delimiter`, ignoring delimiters inside double quotes.
pub fn split_line(line: &str, delimiter: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        if c == '"' {
            quoted = !quoted;
        } else if c == delimiter && !quoted {
            fields.push(&line[start..i]);
            start = i + c.len_utf8();
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Writes delimited text records.
#[derive(Debug)]
pub struct CsvWriter<W> {
    inner: W,
    delimiter: char,
    line: String,
}

impl<W: Write> CsvWriter<W> {
    /// Creates a writer joining fields with `delimiter`.
    pub fn new(inner: W, delimiter: char) -> Self {
        Self {
            inner,
            delimiter,
            line: String::new(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> RecordWriter for CsvWriter<W> {
    fn write_record(&mut self, record: &Record) -> IoResult<()> {
        self.line.clear();
        for (i, value) in record.values().iter().enumerate() {
            if i > 0 {
                self.line.push(self.delimiter);
            }
            match value {
                Value::Binary { ty, .. } => {
                    return Err(IoError::Encode(format!(
                        "binary field of type '{ty}' in text output"
                    )));
                }
                other => self.line.push_str(&other.to_string()),
            }
        }
        self.line.push('\n');
        self.inner.write_all(self.line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> IoResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}
