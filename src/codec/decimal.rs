//! Binary decimal encoding
//!
//! The payload starts with the precision and fraction bytes, followed by the
//! fixed-size binary decimal layout: the integer part and the fractional part
//! are split into groups of nine digits, each group stored big-endian in four
//! bytes, and a leading or trailing partial group uses only as many bytes as
//! its digit count needs. Negative numbers store every byte inverted and the
//! first byte has its top bit flipped, so encodings of equal precision and
//! fraction sort like the numbers.

use crate::common::constants::{
    DIGITS_PER_WORD, DIG_TO_BYTES, MAX_DECIMAL_PRECISION, MAX_DECIMAL_SCALE,
};
use crate::common::error::{PushdownError, PushdownResult};
use crate::encoding_err;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest scale `rust_decimal` can represent
const MAX_NATIVE_SCALE: u32 = 28;

/// Append the encoding of `value` laid out as `DECIMAL(length, frac)`
///
/// A `length` of 0 means nothing was declared: precision and fraction both
/// come from the value itself and `frac` is ignored.
pub fn encode_decimal(buf: &mut Vec<u8>, value: &Decimal, length: u8, frac: u8) -> PushdownResult<()> {
    let (precision, frac) = resolve_precision(value, length, frac)?;
    let bin = decimal_to_bin(value, precision, frac)?;
    buf.reserve(2 + bin.len());
    buf.push(precision);
    buf.push(frac);
    buf.extend_from_slice(&bin);
    Ok(())
}

/// Resolve the precision and fraction a decimal is laid out with
pub fn resolve_precision(value: &Decimal, length: u8, frac: u8) -> PushdownResult<(u8, u8)> {
    let (precision, frac) = if length == 0 {
        let (int_digits, frac_digits) = split_digits(&value.abs());
        let precision = (int_digits.len() + frac_digits.len()).max(1);
        (
            u8::try_from(precision).unwrap_or(u8::MAX),
            u8::try_from(frac_digits.len()).unwrap_or(u8::MAX),
        )
    } else {
        (length, frac)
    };

    if precision == 0 || precision > MAX_DECIMAL_PRECISION {
        return Err(PushdownError::InvalidValue(format!(
            "decimal precision must be between 1 and {}, got {}",
            MAX_DECIMAL_PRECISION, precision
        )));
    }
    if frac > MAX_DECIMAL_SCALE || frac > precision {
        return Err(PushdownError::InvalidValue(format!(
            "decimal fraction {} is invalid for precision {}",
            frac, precision
        )));
    }
    Ok((precision, frac))
}

/// Lay out `value` in the binary decimal format for `DECIMAL(precision, frac)`
///
/// Extra fractional digits are rounded half away from zero. A value whose
/// integer part needs more than `precision - frac` digits is an error.
pub fn decimal_to_bin(value: &Decimal, precision: u8, frac: u8) -> PushdownResult<Vec<u8>> {
    let mut abs = value.abs();
    let target_scale = u32::from(frac).min(MAX_NATIVE_SCALE);
    if abs.scale() > target_scale {
        abs = abs.round_dp_with_strategy(target_scale, RoundingStrategy::MidpointAwayFromZero);
    }
    // A value that rounds to zero is laid out as zero, never as negative zero
    let negative = value.is_sign_negative() && !abs.is_zero();

    let intg = precision
        .checked_sub(frac)
        .ok_or_else(|| encoding_err!("fraction {} exceeds precision {}", frac, precision))?
        as usize;
    let frac = frac as usize;
    let (int_digits, mut frac_digits) = split_digits(&abs);
    if int_digits.len() > intg {
        return Err(encoding_err!(
            "{} does not fit in DECIMAL({},{})",
            value,
            precision,
            frac
        ));
    }
    frac_digits.resize(frac, b'0');

    let mut int_padded = vec![b'0'; intg - int_digits.len()];
    int_padded.extend_from_slice(&int_digits);

    let mask: u32 = if negative { u32::MAX } else { 0 };
    let mut out = Vec::with_capacity(bin_size(precision as usize, frac));

    let lead = intg % DIGITS_PER_WORD;
    let (head, full_words) = int_padded.split_at(lead);
    if lead > 0 {
        write_group(&mut out, head, mask);
    }
    for group in full_words.chunks(DIGITS_PER_WORD) {
        write_group(&mut out, group, mask);
    }
    for group in frac_digits.chunks(DIGITS_PER_WORD) {
        write_group(&mut out, group, mask);
    }

    if let Some(first) = out.first_mut() {
        *first ^= 0x80;
    }
    Ok(out)
}

/// Number of bytes the binary layout of `DECIMAL(precision, frac)` takes
pub fn bin_size(precision: usize, frac: usize) -> usize {
    let intg = precision - frac;
    (intg / DIGITS_PER_WORD) * 4
        + DIG_TO_BYTES[intg % DIGITS_PER_WORD]
        + (frac / DIGITS_PER_WORD) * 4
        + DIG_TO_BYTES[frac % DIGITS_PER_WORD]
}

fn write_group(out: &mut Vec<u8>, digits: &[u8], mask: u32) {
    let size = DIG_TO_BYTES[digits.len()];
    let word = digits
        .iter()
        .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'));
    let bytes = (word ^ mask).to_be_bytes();
    out.extend_from_slice(&bytes[4 - size..]);
}

/// Split a non-negative decimal into integer digits (no leading zeros) and
/// fractional digits (exactly `scale` of them)
fn split_digits(abs: &Decimal) -> (Vec<u8>, Vec<u8>) {
    let digits = abs.mantissa().unsigned_abs().to_string().into_bytes();
    let scale = abs.scale() as usize;
    let (int_part, frac_part) = if digits.len() > scale {
        let (i, f) = digits.split_at(digits.len() - scale);
        (i.to_vec(), f.to_vec())
    } else {
        let mut f = vec![b'0'; scale - digits.len()];
        f.extend_from_slice(&digits);
        (Vec::new(), f)
    };
    let first_nonzero = int_part.iter().position(|d| *d != b'0').unwrap_or(int_part.len());
    (int_part[first_nonzero..].to_vec(), frac_part)
}
