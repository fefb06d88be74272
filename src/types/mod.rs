//! Type system module
//!
//! This module contains the type components the pushdown compiler reads:
//! - LogicalType: protocol type codes and field flags
//! - FieldType: full type descriptors attached to expressions
//! - Value: scalar values produced by constants
//! - Time: temporal values and their packed form
//! - collation: collation name to protocol id table

pub mod collation;
pub mod field_type;
pub mod logical_type;
pub mod time;
pub mod value;

// Re-export main types for convenience
pub use collation::{collation_id, collation_to_proto};
pub use field_type::{FieldType, UNSPECIFIED_LENGTH};
pub use logical_type::{flags, LogicalType};
pub use time::{Time, TimeKind};
pub use value::{Value, ValueKind};
