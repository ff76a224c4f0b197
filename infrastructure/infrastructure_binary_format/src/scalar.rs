//! Scalar Values
//!
//! The closed set of values the binary format can carry, and the one-byte
//! type codes that precede them in tagged mode.

use chrono::{DateTime, Utc};
use entities_numeric::{keys, BigDecimal, BigInteger, NumericError, Result};
use std::fmt;

/// One serializable value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// No value; carries no payload
    Absent,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Decimal(BigDecimal),
    Float32(f32),
    Float64(f64),
    /// Millisecond resolution on the wire
    Instant(DateTime<Utc>),
    /// A single UTF-16 code unit on the wire, so only BMP characters fit
    Char(char),
    Text(String),
    Integer(BigInteger),
    Boolean(bool),
}

impl ScalarValue {
    /// The type code this value is tagged with.
    pub fn data_type(&self) -> DataType {
        DataType::of(self)
    }
}

impl From<i8> for ScalarValue {
    fn from(value: i8) -> Self {
        ScalarValue::Int8(value)
    }
}

impl From<i16> for ScalarValue {
    fn from(value: i16) -> Self {
        ScalarValue::Int16(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int32(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f32> for ScalarValue {
    fn from(value: f32) -> Self {
        ScalarValue::Float32(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<char> for ScalarValue {
    fn from(value: char) -> Self {
        ScalarValue::Char(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<BigDecimal> for ScalarValue {
    fn from(value: BigDecimal) -> Self {
        ScalarValue::Decimal(value)
    }
}

impl From<BigInteger> for ScalarValue {
    fn from(value: BigInteger) -> Self {
        ScalarValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for ScalarValue {
    fn from(value: DateTime<Utc>) -> Self {
        ScalarValue::Instant(value)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ScalarValue::Absent, Into::into)
    }
}

/// Type codes. The discriminants are the stable on-wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    Nul = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Dec = 5,
    Float = 6,
    Double = 7,
    Date = 8,
    Char = 9,
    String = 10,
    BigInt = 11,
    Bool = 12,
}

impl DataType {
    const ALL: [DataType; 13] = [
        DataType::Nul,
        DataType::Byte,
        DataType::Short,
        DataType::Int,
        DataType::Long,
        DataType::Dec,
        DataType::Float,
        DataType::Double,
        DataType::Date,
        DataType::Char,
        DataType::String,
        DataType::BigInt,
        DataType::Bool,
    ];

    /// The on-wire code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a type by its on-wire code.
    ///
    /// # Errors
    /// `InvalidArgument` for codes outside `0..=12`.
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| NumericError::invalid(keys::BAD_DATA_TYPE_CODE, code.to_string()))
    }

    /// The type code of a value.
    pub fn of(value: &ScalarValue) -> Self {
        match value {
            ScalarValue::Absent => DataType::Nul,
            ScalarValue::Int8(_) => DataType::Byte,
            ScalarValue::Int16(_) => DataType::Short,
            ScalarValue::Int32(_) => DataType::Int,
            ScalarValue::Int64(_) => DataType::Long,
            ScalarValue::Decimal(_) => DataType::Dec,
            ScalarValue::Float32(_) => DataType::Float,
            ScalarValue::Float64(_) => DataType::Double,
            ScalarValue::Instant(_) => DataType::Date,
            ScalarValue::Char(_) => DataType::Char,
            ScalarValue::Text(_) => DataType::String,
            ScalarValue::Integer(_) => DataType::BigInt,
            ScalarValue::Boolean(_) => DataType::Bool,
        }
    }

    /// Payload width in bytes for fixed-width types; `None` for the
    /// variable-width decimal, integer and text payloads.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            DataType::Nul => Some(0),
            DataType::Byte | DataType::Bool => Some(1),
            DataType::Short | DataType::Char => Some(2),
            DataType::Int | DataType::Float => Some(4),
            DataType::Long | DataType::Double | DataType::Date => Some(8),
            DataType::Dec | DataType::String | DataType::BigInt => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Nul => "NUL",
            DataType::Byte => "BYTE",
            DataType::Short => "SHORT",
            DataType::Int => "INT",
            DataType::Long => "LONG",
            DataType::Dec => "DEC",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Date => "DATE",
            DataType::Char => "CHAR",
            DataType::String => "STRING",
            DataType::BigInt => "BIGINT",
            DataType::Bool => "BOOL",
        };
        f.write_str(name)
    }
}
