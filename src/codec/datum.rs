//! Scalar value encoding
//!
//! Turns an evaluated [`Value`] into a wire tag plus payload. Which tags may
//! be sent depends on the remote executor, so the capability oracle is
//! consulted here as well.

use crate::codec::decimal::encode_decimal;
use crate::codec::number::{encode_float, encode_int, encode_uint};
use crate::common::error::PushdownResult;
use crate::encoding_err;
use crate::pushdown::capability::{CapabilityOracle, RequestType};
use crate::pushdown::session::SessionContext;
use crate::types::{Time, TimeKind, Value};
use crate::wire::ExprType;

/// Wire tag and payload of one scalar value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedValue {
    pub tp: ExprType,
    pub val: Vec<u8>,
}

impl EncodedValue {
    fn new(tp: ExprType, val: Vec<u8>) -> Self {
        Self { tp, val }
    }
}

/// Encode a value for the remote executor
///
/// Returns `Ok(None)` when the value's kind has no wire form or the remote
/// executor does not accept the resulting tag, and `Err` when the value has a
/// wire form but could not be laid out in it.
pub fn encode_value(
    value: &Value,
    session: &SessionContext,
    oracle: &dyn CapabilityOracle,
) -> PushdownResult<Option<EncodedValue>> {
    let mut val = Vec::new();
    let tp = match value {
        Value::Null => ExprType::Null,
        Value::Int64(v) => {
            encode_int(&mut val, *v);
            ExprType::Int64
        }
        Value::Uint64(v) => {
            encode_uint(&mut val, *v);
            ExprType::Uint64
        }
        Value::String(s) => {
            val.extend_from_slice(s.as_bytes());
            ExprType::String
        }
        Value::BinaryLiteral(bytes) => {
            val.extend_from_slice(bytes);
            ExprType::String
        }
        Value::Bytes(bytes) => {
            val.extend_from_slice(bytes);
            ExprType::Bytes
        }
        Value::Float32(v) => {
            encode_float(&mut val, f64::from(*v));
            ExprType::Float32
        }
        Value::Float64(v) => {
            encode_float(&mut val, *v);
            ExprType::Float64
        }
        Value::Duration(delta) => {
            let nanos = delta
                .num_nanoseconds()
                .ok_or_else(|| encoding_err!("duration {:?} overflows nanoseconds", delta))?;
            encode_int(&mut val, nanos);
            ExprType::MysqlDuration
        }
        Value::Decimal { value, length, frac } => {
            encode_decimal(&mut val, value, *length, *frac)?;
            ExprType::MysqlDecimal
        }
        Value::Time(time) => {
            // Time has its own gate and skips the legacy tag check below
            if !oracle.is_request_type_supported(RequestType::Dag, ExprType::MysqlTime.code() as i64) {
                return Ok(None);
            }
            let packed = normalize_time(time, session)?.to_packed_u64()?;
            encode_uint(&mut val, packed);
            return Ok(Some(EncodedValue::new(ExprType::MysqlTime, val)));
        }
        Value::Json(_) | Value::Enum { .. } | Value::Set { .. } => return Ok(None),
    };

    if !oracle.is_request_type_supported(RequestType::Select, tp.code() as i64) {
        tracing::trace!(tp = %tp, "remote executor rejects constant type");
        return Ok(None);
    }
    Ok(Some(EncodedValue::new(tp, val)))
}

/// The remote executor works in UTC; timestamps are shifted there from the
/// session time zone
fn normalize_time(time: &Time, session: &SessionContext) -> PushdownResult<Time> {
    if time.kind() == TimeKind::Timestamp && !session.is_utc() {
        session.time_zone().to_utc(time)
    } else {
        Ok(*time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::number::{float_bytes, int_bytes, uint_bytes};
    use crate::common::error::PushdownError;
    use crate::pushdown::capability::CapabilityProfile;
    use rust_decimal::Decimal;

    fn encode(value: &Value) -> PushdownResult<Option<EncodedValue>> {
        encode_value(value, &SessionContext::default(), &CapabilityProfile::modern())
    }

    #[test]
    fn test_scalar_tags_and_payloads() {
        let cases = vec![
            (Value::Null, ExprType::Null, vec![]),
            (Value::Int64(-7), ExprType::Int64, int_bytes(-7)),
            (Value::Uint64(7), ExprType::Uint64, uint_bytes(7)),
            (Value::string("abc"), ExprType::String, b"abc".to_vec()),
            (Value::BinaryLiteral(vec![1, 2]), ExprType::String, vec![1, 2]),
            (Value::Bytes(vec![0xff]), ExprType::Bytes, vec![0xff]),
            (Value::Float32(1.5), ExprType::Float32, float_bytes(1.5)),
            (Value::Float64(-2.25), ExprType::Float64, float_bytes(-2.25)),
            (Value::duration_nanos(-3_000), ExprType::MysqlDuration, int_bytes(-3_000)),
        ];
        for (value, tp, val) in cases {
            let encoded = encode(&value).unwrap().expect("convertible");
            assert_eq!(encoded.tp, tp, "{}", value);
            assert_eq!(encoded.val, val, "{}", value);
        }
    }

    #[test]
    fn test_float32_encodes_through_f64() {
        let encoded = encode(&Value::Float32(0.1)).unwrap().unwrap();
        assert_eq!(encoded.val, float_bytes(f64::from(0.1f32)));
    }

    #[test]
    fn test_decimal_payload() {
        let value = Value::decimal(Decimal::new(12345, 2), 6, 2);
        let encoded = encode(&value).unwrap().unwrap();
        assert_eq!(encoded.tp, ExprType::MysqlDecimal);
        assert_eq!(encoded.val[..2], [6u8, 2]);
    }

    #[test]
    fn test_decimal_overflow_is_error() {
        let value = Value::decimal(Decimal::new(12345, 2), 3, 2);
        assert!(matches!(encode(&value), Err(PushdownError::Encoding(_))));
    }

    #[test]
    fn test_unsupported_kinds() {
        assert_eq!(encode(&Value::Json(serde_json::json!({"a": 1}))).unwrap(), None);
        assert_eq!(encode(&Value::Enum { name: "a".into(), value: 1 }).unwrap(), None);
        assert_eq!(encode(&Value::Set { name: "a".into(), value: 1 }).unwrap(), None);
    }

    #[test]
    fn test_time_requires_dag_support() {
        let value = Value::datetime("2018-01-01 00:00:00").unwrap();
        let legacy = CapabilityProfile::legacy();
        assert_eq!(encode_value(&value, &SessionContext::default(), &legacy).unwrap(), None);

        let encoded = encode(&value).unwrap().unwrap();
        assert_eq!(encoded.tp, ExprType::MysqlTime);
        assert_eq!(encoded.val.len(), 8);
    }

    #[test]
    fn test_timestamp_is_normalized_to_utc() {
        let shanghai = SessionContext::with_offset_seconds(8 * 3600).unwrap();
        let local = Value::timestamp("2018-01-01 08:00:00").unwrap();
        let utc = Value::timestamp("2018-01-01 00:00:00").unwrap();
        let oracle = CapabilityProfile::modern();

        let shifted = encode_value(&local, &shanghai, &oracle).unwrap().unwrap();
        let plain = encode_value(&utc, &SessionContext::default(), &oracle).unwrap().unwrap();
        assert_eq!(shifted, plain);
    }

    #[test]
    fn test_datetime_is_not_shifted() {
        let shanghai = SessionContext::with_offset_seconds(8 * 3600).unwrap();
        let value = Value::datetime("2018-01-01 08:00:00").unwrap();
        let oracle = CapabilityProfile::modern();
        let a = encode_value(&value, &shanghai, &oracle).unwrap();
        let b = encode_value(&value, &SessionContext::default(), &oracle).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejected_tag() {
        let oracle = CapabilityProfile::empty();
        assert_eq!(
            encode_value(&Value::Int64(1), &SessionContext::default(), &oracle).unwrap(),
            None
        );
    }
}
