//! Order-preserving fixed width number encodings
//!
//! Every encoding here is 8 bytes big-endian and compares byte-wise in the
//! same order as the numbers it encodes.

use crate::common::constants::{INT_ENCODED_LEN, SIGN_MASK};
use byteorder::{BigEndian, ByteOrder};

/// Append the sortable form of a signed integer
pub fn encode_int(buf: &mut Vec<u8>, v: i64) {
    encode_uint(buf, (v as u64) ^ SIGN_MASK);
}

/// Append the sortable form of an unsigned integer
pub fn encode_uint(buf: &mut Vec<u8>, v: u64) {
    let mut data = [0u8; INT_ENCODED_LEN];
    BigEndian::write_u64(&mut data, v);
    buf.extend_from_slice(&data);
}

/// Append the sortable form of a float
pub fn encode_float(buf: &mut Vec<u8>, v: f64) {
    encode_uint(buf, float_to_cmp_u64(v));
}

fn float_to_cmp_u64(v: f64) -> u64 {
    let bits = v.to_bits();
    if v >= 0.0 {
        bits | SIGN_MASK
    } else {
        !bits
    }
}

/// Signed integer encoding as a fresh buffer
pub fn int_bytes(v: i64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(INT_ENCODED_LEN);
    encode_int(&mut buf, v);
    buf
}

/// Unsigned integer encoding as a fresh buffer
pub fn uint_bytes(v: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(INT_ENCODED_LEN);
    encode_uint(&mut buf, v);
    buf
}

/// Float encoding as a fresh buffer
pub fn float_bytes(v: f64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(INT_ENCODED_LEN);
    encode_float(&mut buf, v);
    buf
}
