//! Error handling for the pushdown compiler
//!
//! None of these errors abort a query. The converter turns every one of them
//! into a diagnostic plus an "unconvertible" outcome, and the expression stays
//! with the coordinator.

use thiserror::Error;

/// Main error type for pushdown operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PushdownError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A constant's value could not be computed
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// A value could not be laid out in its wire form
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Time zone conversion error: {0}")]
    TimeZone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PushdownError {
    fn from(err: serde_json::Error) -> Self {
        PushdownError::Config(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for PushdownError {
    fn from(err: bincode::error::EncodeError) -> Self {
        PushdownError::Serialization(err.to_string())
    }
}

/// Result type alias for pushdown operations
pub type PushdownResult<T> = std::result::Result<T, PushdownError>;

/// Macro for creating encoding errors
#[macro_export]
macro_rules! encoding_err {
    ($msg:expr) => {
        $crate::common::error::PushdownError::Encoding($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::PushdownError::Encoding(format!($fmt, $($arg)*))
    };
}

/// Macro for creating evaluation errors
#[macro_export]
macro_rules! evaluation_err {
    ($msg:expr) => {
        $crate::common::error::PushdownError::Evaluation($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::PushdownError::Evaluation(format!($fmt, $($arg)*))
    };
}
