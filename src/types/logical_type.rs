use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical column types, numbered with the protocol's type codes
/// These codes travel verbatim in the `tp` field of a wire field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogicalType {
    /// Type not yet resolved
    Unspecified = 0,
    /// 8-bit integer
    Tiny = 1,
    /// 16-bit integer
    Short = 2,
    /// 32-bit integer
    Long = 3,
    /// 32-bit floating point
    Float = 4,
    /// 64-bit floating point
    Double = 5,
    /// NULL literal type
    Null = 6,
    /// Instant stored in UTC, shown in the session time zone
    Timestamp = 7,
    /// 64-bit integer
    LongLong = 8,
    /// 24-bit integer
    Int24 = 9,
    /// Calendar date
    Date = 10,
    /// Signed time offset
    Duration = 11,
    /// Date and time of day without a zone
    Datetime = 12,
    /// Year
    Year = 13,
    NewDate = 14,
    /// Variable length string
    Varchar = 15,
    /// Bit field
    Bit = 16,
    /// JSON document
    Json = 0xf5,
    /// Fixed point decimal
    NewDecimal = 0xf6,
    /// Enumeration
    Enum = 0xf7,
    /// Set of enumeration members
    Set = 0xf8,
    TinyBlob = 0xf9,
    MediumBlob = 0xfa,
    LongBlob = 0xfb,
    Blob = 0xfc,
    VarString = 0xfd,
    /// Fixed length string
    String = 0xfe,
    /// Spatial value
    Geometry = 0xff,
}

impl LogicalType {
    /// Numeric code of this type on the wire
    pub fn code(self) -> i32 {
        self as u8 as i32
    }

    /// Whether a column of this type can be read by the remote executor
    ///
    /// Bit fields, sets, enums and spatial values have no representation in
    /// the remote executor's row format.
    pub fn is_remote_representable(self) -> bool {
        !matches!(
            self,
            LogicalType::Bit
                | LogicalType::Set
                | LogicalType::Enum
                | LogicalType::Geometry
                | LogicalType::Unspecified
        )
    }

    /// Check if this type is a string or blob type
    pub fn is_string(self) -> bool {
        matches!(
            self,
            LogicalType::Varchar
                | LogicalType::VarString
                | LogicalType::String
                | LogicalType::TinyBlob
                | LogicalType::MediumBlob
                | LogicalType::LongBlob
                | LogicalType::Blob
        )
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalType::Unspecified => "UNSPECIFIED",
            LogicalType::Tiny => "TINYINT",
            LogicalType::Short => "SMALLINT",
            LogicalType::Long => "INT",
            LogicalType::Float => "FLOAT",
            LogicalType::Double => "DOUBLE",
            LogicalType::Null => "NULL",
            LogicalType::Timestamp => "TIMESTAMP",
            LogicalType::LongLong => "BIGINT",
            LogicalType::Int24 => "MEDIUMINT",
            LogicalType::Date | LogicalType::NewDate => "DATE",
            LogicalType::Duration => "TIME",
            LogicalType::Datetime => "DATETIME",
            LogicalType::Year => "YEAR",
            LogicalType::Varchar | LogicalType::VarString => "VARCHAR",
            LogicalType::Bit => "BIT",
            LogicalType::Json => "JSON",
            LogicalType::NewDecimal => "DECIMAL",
            LogicalType::Enum => "ENUM",
            LogicalType::Set => "SET",
            LogicalType::TinyBlob => "TINYBLOB",
            LogicalType::MediumBlob => "MEDIUMBLOB",
            LogicalType::LongBlob => "LONGBLOB",
            LogicalType::Blob => "BLOB",
            LogicalType::String => "CHAR",
            LogicalType::Geometry => "GEOMETRY",
        };
        write!(f, "{}", name)
    }
}

/// Field flag bits carried in a field type
pub mod flags {
    pub const NOT_NULL: u32 = 1;
    pub const PRI_KEY: u32 = 1 << 1;
    pub const UNIQUE_KEY: u32 = 1 << 2;
    pub const MULTIPLE_KEY: u32 = 1 << 3;
    pub const BLOB: u32 = 1 << 4;
    pub const UNSIGNED: u32 = 1 << 5;
    pub const ZEROFILL: u32 = 1 << 6;
    pub const BINARY: u32 = 1 << 7;
    pub const ENUM: u32 = 1 << 8;
    pub const AUTO_INCREMENT: u32 = 1 << 9;
    pub const TIMESTAMP: u32 = 1 << 10;
    pub const SET: u32 = 1 << 11;
}
