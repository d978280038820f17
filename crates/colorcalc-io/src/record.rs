//! Records and field values.
//!
//! Readers produce records of opaque values: CSV text or raw binary bytes.
//! Only the three channel fields are ever decoded; every other value is
//! written back exactly as it was read.

use byteorder::{LittleEndian, ReadBytesExt};
use colorcalc_core::StorageKind;
use smallvec::SmallVec;

use crate::FieldType;

/// Raw bytes of one binary field.
pub type FieldBytes = SmallVec<[u8; 8]>;

/// One field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// CSV field, verbatim.
    Text(String),
    /// Binary field, verbatim.
    Binary {
        /// Declared type.
        ty: FieldType,
        /// Little-endian bytes.
        bytes: FieldBytes,
    },
    /// Converted channel value.
    Number {
        /// Converted value.
        value: f64,
        /// Storage the value is written as.
        storage: StorageKind,
    },
}

impl Value {
    /// Decodes the value as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Binary { ty, bytes } => decode(*ty, bytes),
            Self::Number { value, .. } => Some(*value),
        }
    }
}

fn decode(ty: FieldType, bytes: &[u8]) -> Option<f64> {
    let mut r = bytes;
    let v = match ty {
        FieldType::I8 => r.read_i8().ok()? as f64,
        FieldType::U8 => r.read_u8().ok()? as f64,
        FieldType::I16 => r.read_i16::<LittleEndian>().ok()? as f64,
        FieldType::U16 => r.read_u16::<LittleEndian>().ok()? as f64,
        FieldType::I32 => r.read_i32::<LittleEndian>().ok()? as f64,
        FieldType::U32 => r.read_u32::<LittleEndian>().ok()? as f64,
        FieldType::I64 => r.read_i64::<LittleEndian>().ok()? as f64,
        FieldType::U64 => r.read_u64::<LittleEndian>().ok()? as f64,
        FieldType::F32 => r.read_f32::<LittleEndian>().ok()? as f64,
        FieldType::F64 => r.read_f64::<LittleEndian>().ok()?,
        FieldType::Str(_) | FieldType::Time => return None,
    };
    Some(v)
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Binary { ty, bytes } => match decode(*ty, bytes) {
                Some(v) => write!(f, "{v}"),
                None => write!(f, "{}", String::from_utf8_lossy(bytes).trim_end_matches('\0')),
            },
            Self::Number { value, storage } => f.write_str(&format_number(*value, *storage)),
        }
    }
}

/// Formats a converted value for text output.
///
/// Integer storage prints without a fractional part; floats use the
/// shortest representation that reads back to the same value.
pub fn format_number(value: f64, storage: StorageKind) -> String {
    match storage {
        StorageKind::U8 | StorageKind::U16 | StorageKind::U32 => (value as u64).to_string(),
        StorageKind::F32 => (value as f32).to_string(),
        StorageKind::F64 => value.to_string(),
    }
}

/// One record: field values in stream order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    /// Creates a record.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Field values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Replaces the value at `index`; out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_text_as_f64() {
        assert_eq!(Value::Text(" 12.5".into()).as_f64(), Some(12.5));
        assert_eq!(Value::Text("abc".into()).as_f64(), None);
        assert_eq!(Value::Text(String::new()).as_f64(), None);
    }

    #[test]
    fn test_binary_as_f64() {
        let v = Value::Binary {
            ty: FieldType::U16,
            bytes: smallvec![0x01, 0x01],
        };
        assert_eq!(v.as_f64(), Some(257.0));
        let v = Value::Binary {
            ty: FieldType::F32,
            bytes: SmallVec::from_slice(&1.5f32.to_le_bytes()),
        };
        assert_eq!(v.as_f64(), Some(1.5));
        let v = Value::Binary {
            ty: FieldType::I8,
            bytes: smallvec![0xff],
        };
        assert_eq!(v.as_f64(), Some(-1.0));
        let v = Value::Binary {
            ty: FieldType::Str(2),
            bytes: smallvec![b'h', b'i'],
        };
        assert_eq!(v.as_f64(), None);
        assert_eq!(v.to_string(), "hi");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(17.0, StorageKind::U8), "17");
        assert_eq!(format_number(65535.0, StorageKind::U16), "65535");
        assert_eq!(format_number(0.5, StorageKind::F32), "0.5");
        assert_eq!(format_number(16.0, StorageKind::F64), "16");
        assert_eq!(
            format_number(17.558764705882353, StorageKind::F64),
            "17.558764705882353"
        );
    }

    #[test]
    fn test_record_set() {
        let mut r = Record::new(vec![Value::Text("a".into()), Value::Text("1".into())]);
        r.set(
            1,
            Value::Number {
                value: 2.0,
                storage: StorageKind::U8,
            },
        );
        r.set(5, Value::Text("ignored".into()));
        assert_eq!(r.len(), 2);
        assert_eq!(r.get(1).unwrap().to_string(), "2");
    }
}
