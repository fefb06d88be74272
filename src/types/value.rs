use crate::common::error::{PushdownError, PushdownResult};
use crate::types::time::{Time, TimeKind};
use chrono::TimeDelta;
use rust_decimal::Decimal;
use std::fmt;

/// Kind tag of a [`Value`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Int64,
    Uint64,
    Float32,
    Float64,
    String,
    BinaryLiteral,
    Bytes,
    Duration,
    Decimal,
    Time,
    Json,
    Enum,
    Set,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Represents a single scalar value produced by evaluating a constant
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value (type is stored separately)
    Null,
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 64-bit integer
    Uint64(u64),
    /// Single precision float
    Float32(f32),
    /// Double precision float
    Float64(f64),
    /// Character string
    String(String),
    /// Hex or bit literal such as `0x4142`, compared like a string
    BinaryLiteral(Vec<u8>),
    /// Binary string
    Bytes(Vec<u8>),
    /// Signed time offset
    Duration(TimeDelta),
    /// Fixed point decimal with its declared length and fractional digits
    ///
    /// A length of 0 means the precision was not declared and is derived from
    /// the value itself.
    Decimal {
        value: Decimal,
        length: u8,
        frac: u8,
    },
    /// Date, datetime or timestamp
    Time(Time),
    /// JSON document
    Json(serde_json::Value),
    /// Enumeration member
    Enum { name: String, value: u64 },
    /// Set of enumeration members
    Set { name: String, value: u64 },
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int64(_) => ValueKind::Int64,
            Value::Uint64(_) => ValueKind::Uint64,
            Value::Float32(_) => ValueKind::Float32,
            Value::Float64(_) => ValueKind::Float64,
            Value::String(_) => ValueKind::String,
            Value::BinaryLiteral(_) => ValueKind::BinaryLiteral,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Duration(_) => ValueKind::Duration,
            Value::Decimal { .. } => ValueKind::Decimal,
            Value::Time(_) => ValueKind::Time,
            Value::Json(_) => ValueKind::Json,
            Value::Enum { .. } => ValueKind::Enum,
            Value::Set { .. } => ValueKind::Set,
        }
    }

    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Create a decimal with an explicit declared length and fraction
    pub fn decimal(value: Decimal, length: u8, frac: u8) -> Self {
        Value::Decimal { value, length, frac }
    }

    /// Parse a decimal literal, deriving its length and fraction from the text
    pub fn parse_decimal(text: &str) -> PushdownResult<Self> {
        let value: Decimal = text
            .trim()
            .parse()
            .map_err(|e| PushdownError::InvalidValue(format!("invalid decimal '{}': {}", text, e)))?;
        let frac = value.scale() as u8;
        Ok(Value::Decimal {
            value,
            length: 0,
            frac,
        })
    }

    /// Create a duration from a nanosecond count
    pub fn duration_nanos(nanos: i64) -> Self {
        Value::Duration(TimeDelta::nanoseconds(nanos))
    }

    /// Create a timestamp from `YYYY-MM-DD HH:MM:SS[.ffffff]` text
    pub fn timestamp(text: &str) -> PushdownResult<Self> {
        Ok(Value::Time(Time::parse(text, TimeKind::Timestamp, 6)?))
    }

    /// Create a datetime from `YYYY-MM-DD HH:MM:SS[.ffffff]` text
    pub fn datetime(text: &str) -> PushdownResult<Self> {
        Ok(Value::Time(Time::parse(text, TimeKind::Datetime, 6)?))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int64(value) => write!(f, "{}", value),
            Value::Uint64(value) => write!(f, "{}", value),
            Value::Float32(value) => write!(f, "{}", value),
            Value::Float64(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "'{}'", value),
            Value::BinaryLiteral(bytes) | Value::Bytes(bytes) => {
                write!(f, "0x")?;
                for b in bytes {
                    write!(f, "{:02X}", b)?;
                }
                Ok(())
            }
            Value::Duration(delta) => write!(f, "DURATION({}ns)", delta.num_nanoseconds().unwrap_or(i64::MAX)),
            Value::Decimal { value, .. } => write!(f, "{}", value),
            Value::Time(time) => write!(f, "'{}'", time),
            Value::Json(doc) => write!(f, "{}", doc),
            Value::Enum { name, .. } | Value::Set { name, .. } => write!(f, "'{}'", name),
        }
    }
}
