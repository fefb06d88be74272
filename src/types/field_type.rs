//! Field type descriptors attached to expressions

use crate::common::constants::{CHARSET_BIN, DEFAULT_CHARSET, DEFAULT_COLLATION};
use crate::types::logical_type::{flags, LogicalType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length or fractional digit count that was never declared
pub const UNSPECIFIED_LENGTH: i32 = -1;

/// Full type descriptor of an expression or column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    pub tp: LogicalType,
    pub flag: u32,
    /// Declared display length / precision
    pub flen: i32,
    /// Declared fractional digits
    pub decimal: i32,
    pub charset: String,
    pub collate: String,
}

impl FieldType {
    /// Create a field type with unspecified length and the default charset
    /// for its kind
    pub fn new(tp: LogicalType) -> Self {
        let (charset, collate) = if tp.is_string() || tp == LogicalType::Json {
            (DEFAULT_CHARSET, DEFAULT_COLLATION)
        } else {
            (CHARSET_BIN, CHARSET_BIN)
        };
        Self {
            tp,
            flag: 0,
            flen: UNSPECIFIED_LENGTH,
            decimal: UNSPECIFIED_LENGTH,
            charset: charset.to_string(),
            collate: collate.to_string(),
        }
    }

    /// Signed 64-bit integer
    pub fn bigint() -> Self {
        Self::new(LogicalType::LongLong).with_flen(20).with_decimal(0)
    }

    /// Unsigned 64-bit integer
    pub fn unsigned_bigint() -> Self {
        Self::bigint().with_flag(flags::UNSIGNED)
    }

    /// Double precision float
    pub fn double() -> Self {
        Self::new(LogicalType::Double).with_flen(22)
    }

    /// Variable length string with the default charset
    pub fn varchar(flen: i32) -> Self {
        Self::new(LogicalType::Varchar).with_flen(flen)
    }

    /// Binary string
    pub fn varbinary(flen: i32) -> Self {
        Self::new(LogicalType::Varchar)
            .with_flen(flen)
            .with_flag(flags::BINARY)
            .with_charset(CHARSET_BIN, CHARSET_BIN)
    }

    /// Fixed point decimal with precision and fractional digits
    pub fn decimal(precision: i32, frac: i32) -> Self {
        Self::new(LogicalType::NewDecimal)
            .with_flen(precision)
            .with_decimal(frac)
    }

    /// Boolean results of comparisons and logic functions
    pub fn boolean() -> Self {
        Self::new(LogicalType::Tiny).with_flen(1).with_decimal(0)
    }

    pub fn with_flag(mut self, flag: u32) -> Self {
        self.flag |= flag;
        self
    }

    pub fn with_flen(mut self, flen: i32) -> Self {
        self.flen = flen;
        self
    }

    pub fn with_decimal(mut self, decimal: i32) -> Self {
        self.decimal = decimal;
        self
    }

    pub fn with_charset(mut self, charset: &str, collate: &str) -> Self {
        self.charset = charset.to_string();
        self.collate = collate.to_string();
        self
    }

    /// Check whether a flag bit is set
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flag & flag != 0
    }

    pub fn is_unsigned(&self) -> bool {
        self.has_flag(flags::UNSIGNED)
    }

    pub fn is_not_null(&self) -> bool {
        self.has_flag(flags::NOT_NULL)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tp)?;
        if self.flen != UNSPECIFIED_LENGTH {
            if self.decimal != UNSPECIFIED_LENGTH && self.decimal > 0 {
                write!(f, "({},{})", self.flen, self.decimal)?;
            } else {
                write!(f, "({})", self.flen)?;
            }
        }
        if self.is_unsigned() {
            write!(f, " UNSIGNED")?;
        }
        if self.tp.is_string() {
            write!(f, " CHARACTER SET {} COLLATE {}", self.charset, self.collate)?;
        }
        Ok(())
    }
}
