//! Value codec
//!
//! Byte encodings of scalar values and type descriptors:
//! - number: order-preserving integer and float encodings
//! - decimal: binary decimal layout
//! - datum: value dispatch and capability gating
//! - field_type: type descriptor records

pub mod datum;
pub mod decimal;
pub mod field_type;
pub mod number;

pub use datum::{encode_value, EncodedValue};
pub use decimal::encode_decimal;
pub use field_type::encode_field_type;
pub use number::{encode_float, encode_int, encode_uint};
