//! Binary record format strings.
//!
//! A format is a comma-separated list of field types, each optionally
//! prefixed with a repeat count:
//!
//! | Token  | Type                         | Bytes |
//! |--------|------------------------------|-------|
//! | `b`    | signed 8-bit integer         | 1     |
//! | `ub`   | unsigned 8-bit integer       | 1     |
//! | `w`    | signed 16-bit integer        | 2     |
//! | `uw`   | unsigned 16-bit integer      | 2     |
//! | `i`    | signed 32-bit integer        | 4     |
//! | `ui`   | unsigned 32-bit integer      | 4     |
//! | `l`    | signed 64-bit integer        | 8     |
//! | `ul`   | unsigned 64-bit integer      | 8     |
//! | `f`    | 32-bit float                 | 4     |
//! | `d`    | 64-bit float                 | 8     |
//! | `s[N]` | fixed-size string            | N     |
//! | `t`    | timestamp, microseconds      | 8     |
//!
//! All values are little-endian.
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_io::Format;
//!
//! let format: Format = "s[10],3f,t".parse().unwrap();
//! assert_eq!(format.len(), 5);
//! assert_eq!(format.size(), 30);
//! assert_eq!(format.to_string(), "s[10],f,f,f,t");
//! ```

use std::fmt;
use std::str::FromStr;

use colorcalc_color::FieldMap;
use colorcalc_core::StorageKind;

use crate::{IoError, IoResult};

/// Type of one binary field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `b`
    I8,
    /// `ub`
    U8,
    /// `w`
    I16,
    /// `uw`
    U16,
    /// `i`
    I32,
    /// `ui`
    U32,
    /// `l`
    I64,
    /// `ul`
    U64,
    /// `f`
    F32,
    /// `d`
    F64,
    /// `s[N]`
    Str(usize),
    /// `t`
    Time,
}

impl FieldType {
    /// Parses one token without count prefix.
    pub fn parse(token: &str) -> IoResult<Self> {
        let ty = match token {
            "b" => Self::I8,
            "ub" => Self::U8,
            "w" => Self::I16,
            "uw" => Self::U16,
            "i" => Self::I32,
            "ui" => Self::U32,
            "l" => Self::I64,
            "ul" => Self::U64,
            "f" => Self::F32,
            "d" => Self::F64,
            "t" => Self::Time,
            s => {
                let len = s
                    .strip_prefix("s[")
                    .and_then(|rest| rest.strip_suffix(']'))
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|&n| n > 0)
                    .ok_or_else(|| IoError::InvalidFormat(format!("unknown field type '{s}'")))?;
                Self::Str(len)
            }
        };
        Ok(ty)
    }

    /// Size in bytes.
    pub const fn size(&self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 | Self::Time => 8,
            Self::Str(n) => *n,
        }
    }

    /// Whether values of this type can be read as channel values.
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, Self::Str(_) | Self::Time)
    }

    /// Field type that stores values of `kind`.
    pub const fn for_storage(kind: StorageKind) -> Self {
        match kind {
            StorageKind::U8 => Self::U8,
            StorageKind::U16 => Self::U16,
            StorageKind::U32 => Self::U32,
            StorageKind::F32 => Self::F32,
            StorageKind::F64 => Self::F64,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8 => f.write_str("b"),
            Self::U8 => f.write_str("ub"),
            Self::I16 => f.write_str("w"),
            Self::U16 => f.write_str("uw"),
            Self::I32 => f.write_str("i"),
            Self::U32 => f.write_str("ui"),
            Self::I64 => f.write_str("l"),
            Self::U64 => f.write_str("ul"),
            Self::F32 => f.write_str("f"),
            Self::F64 => f.write_str("d"),
            Self::Str(n) => write!(f, "s[{n}]"),
            Self::Time => f.write_str("t"),
        }
    }
}

/// Layout of one binary record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    fields: Vec<FieldType>,
}

impl Format {
    /// Creates a format from field types.
    pub fn new(fields: Vec<FieldType>) -> Self {
        Self { fields }
    }

    /// Parses a format string such as `s[10],3f,t`.
    pub fn parse(s: &str) -> IoResult<Self> {
        let mut fields = Vec::new();
        for token in s.split(',') {
            let token = token.trim();
            let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            let (count, ty) = token.split_at(digits);
            let count = match count {
                "" => 1,
                n => n
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| IoError::InvalidFormat(format!("invalid count in '{token}'")))?,
            };
            let ty = FieldType::parse(ty)?;
            fields.extend(std::iter::repeat_n(ty, count));
        }
        Ok(Self { fields })
    }

    /// Field types in order.
    pub fn fields(&self) -> &[FieldType] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the format has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Record size in bytes.
    pub fn size(&self) -> usize {
        self.fields.iter().map(FieldType::size).sum()
    }

    /// Checks that declared fields fit the format and channels are numeric.
    pub fn check_fields(&self, map: &FieldMap) -> IoResult<()> {
        if map.width() > self.len() {
            return Err(IoError::InvalidFormat(format!(
                "{} field names given for a {}-field format",
                map.width(),
                self.len()
            )));
        }
        for index in map.channels() {
            let ty = self.fields[index];
            if !ty.is_numeric() {
                return Err(IoError::InvalidFormat(format!(
                    "channel field {index} has non-numeric type '{ty}'"
                )));
            }
        }
        Ok(())
    }

    /// Format of converted records: channel fields take the storage type.
    pub fn with_channels(&self, map: &FieldMap, storage: StorageKind) -> Self {
        let mut fields = self.fields.clone();
        for index in map.channels() {
            if let Some(ty) = fields.get_mut(index) {
                *ty = FieldType::for_storage(storage);
            }
        }
        Self { fields }
    }
}

impl FromStr for Format {
    type Err = IoError;

    fn from_str(s: &str) -> IoResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
