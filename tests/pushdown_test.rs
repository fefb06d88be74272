//! End-to-end pushdown tests
//!
//! Builds planner expressions, converts them against capability profiles of
//! different remote executor generations and checks the wire trees.

use pretty_assertions::assert_eq;
use prism_pushdown::codec::number::{int_bytes, uint_bytes};
use prism_pushdown::expression::function::{names, sig};
use prism_pushdown::types::{collation_to_proto, Time, TimeKind};
use prism_pushdown::{
    expressions_to_wire, AggregateFunction, CapabilityOracle, CapabilityProfile,
    CollectingDiagnostics, Diagnostic, ExprType, Expression, ExpressionRef, FieldType,
    LogicalType, PushdownResult, RequestType, SessionContext, Value, WireConverter, WireExpr,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn column(offset: usize, id: i64, tp: LogicalType) -> ExpressionRef {
    Expression::column(offset, id, format!("col{}", offset), FieldType::new(tp)).into_ref()
}

fn int(v: i64) -> ExpressionRef {
    Expression::constant(Value::Int64(v), FieldType::bigint()).into_ref()
}

fn call(name: &str, sig: i32, args: Vec<ExpressionRef>) -> ExpressionRef {
    Expression::function(name, args, FieldType::boolean(), Some(sig)).into_ref()
}

/// Attach a `tracing` subscriber so converter logs show up with `--nocapture`
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ========== CAPABILITY GATING ==========

#[test]
fn test_column_addressing_by_generation() {
    init_tracing();
    let session = SessionContext::default();

    let by_offset = column(5, 0, LogicalType::LongLong);
    let modern = CapabilityProfile::modern();
    let wire = WireConverter::new(&modern, &session).expr_to_wire(&by_offset).unwrap();
    assert_eq!(wire.val, int_bytes(5));
    assert!(wire.field_type.is_some());

    let legacy = CapabilityProfile::legacy();
    let conv = WireConverter::new(&legacy, &session);
    assert_eq!(conv.expr_to_wire(&by_offset), None);

    let by_id = column(5, 42, LogicalType::LongLong);
    let wire = conv.expr_to_wire(&by_id).unwrap();
    assert_eq!(wire, WireExpr::leaf(ExprType::ColumnRef, int_bytes(42), None));
}

#[test]
fn test_time_constant_needs_modern_executor() -> PushdownResult<()> {
    let session = SessionContext::default();
    let ts = Expression::constant(
        Value::datetime("2020-05-06 07:08:09")?,
        FieldType::new(LogicalType::Datetime),
    );

    let legacy = CapabilityProfile::legacy();
    assert_eq!(WireConverter::new(&legacy, &session).expr_to_wire(&ts), None);

    let modern = CapabilityProfile::modern();
    let wire = WireConverter::new(&modern, &session).expr_to_wire(&ts).unwrap();
    assert_eq!(wire.tp, ExprType::MysqlTime);
    Ok(())
}

/// Modern executor that has lost `MysqlTime` support and counts its queries
struct NoTimeOracle {
    queries: AtomicUsize,
}

impl CapabilityOracle for NoTimeOracle {
    fn is_request_type_supported(&self, req_type: RequestType, sub_type: i64) -> bool {
        self.queries.fetch_add(1, Ordering::Relaxed);
        match req_type {
            RequestType::Select | RequestType::Dag => sub_type != i64::from(ExprType::MysqlTime.code()),
            _ => false,
        }
    }
}

#[test]
fn test_custom_oracle_is_consulted() -> PushdownResult<()> {
    let session = SessionContext::default();
    let oracle = NoTimeOracle { queries: AtomicUsize::new(0) };
    let conv = WireConverter::new(&oracle, &session);

    let time = Expression::constant(Value::datetime("2020-01-01 00:00:00")?, FieldType::new(LogicalType::Datetime));
    assert_eq!(conv.expr_to_wire(&time), None);

    let filter = call(names::EQ, sig::EQ_INT, vec![column(4, 9, LogicalType::LongLong), int(1)]);
    let wire = conv.expr_to_wire(&filter).unwrap();
    assert_eq!(wire.children[0].val, int_bytes(4));
    assert!(oracle.queries.load(Ordering::Relaxed) > 0);
    Ok(())
}

#[test]
fn test_nothing_converts_against_empty_profile() {
    let session = SessionContext::default();
    let empty = CapabilityProfile::empty();
    let conv = WireConverter::new(&empty, &session);

    assert_eq!(conv.expr_to_wire(&int(1)), None);
    assert_eq!(conv.expr_to_wire(&column(0, 1, LogicalType::LongLong)), None);
}

// ========== FILTER PARTITIONING ==========

#[test]
fn test_and_with_unsupported_column_stays_local() {
    let session = SessionContext::default();
    let oracle = CapabilityProfile::modern();

    let and = call(
        names::LOGIC_AND,
        sig::LOGICAL_AND,
        vec![int(5), column(2, 3, LogicalType::Geometry)],
    );
    let split = expressions_to_wire(&session, &oracle, &[and.clone()]);
    assert!(split.condition.is_none());
    assert!(split.pushed.is_empty());
    assert_eq!(split.remained.len(), 1);
    assert!(Arc::ptr_eq(&split.remained[0], &and));
}

#[test]
fn test_partition_preserves_order_and_merges() {
    let session = SessionContext::default();
    let oracle = CapabilityProfile::modern();
    let conv = WireConverter::new(&oracle, &session);

    let e1 = call(names::GT, sig::GT_INT, vec![column(0, 1, LogicalType::LongLong), int(10)]);
    let e2 = call(names::EQ, sig::EQ_INT, vec![column(1, 2, LogicalType::Set), int(1)]);
    let e3 = call(names::LT, sig::LT_INT, vec![column(2, 3, LogicalType::LongLong), int(99)]);
    let e4 = Expression::function("soundex", vec![int(1)], FieldType::boolean(), Some(1)).into_ref();

    let split = conv.expressions_to_wire(&[e1.clone(), e2.clone(), e3.clone(), e4.clone()]);

    let expected = WireExpr::and(conv.expr_to_wire(&e1).unwrap(), conv.expr_to_wire(&e3).unwrap());
    assert_eq!(split.condition, Some(expected));
    assert_eq!(split.pushed, vec![e1, e3]);
    assert_eq!(split.remained, vec![e2, e4]);
}

#[test]
fn test_conversion_is_total_over_mixed_inputs() -> PushdownResult<()> {
    let session = SessionContext::with_offset_seconds(8 * 3600)?;
    let oracle = CapabilityProfile::legacy();
    let sink = CollectingDiagnostics::new();
    let conv = WireConverter::new(&oracle, &session).with_diagnostics(&sink);

    let values = vec![
        Value::Null,
        Value::Int64(i64::MIN),
        Value::Uint64(u64::MAX),
        Value::Float32(1.5),
        Value::Float64(f64::NAN),
        Value::string("abc"),
        Value::Bytes(vec![0, 1, 2]),
        Value::BinaryLiteral(vec![0xff]),
        Value::duration_nanos(-1),
        Value::parse_decimal("-0.001")?,
        Value::timestamp("2000-01-01 00:00:00")?,
        Value::Json(serde_json::json!({"a": 1})),
        Value::Enum { name: "a".to_string(), value: 1 },
        Value::Set { name: "a,b".to_string(), value: 3 },
    ];
    let exprs: Vec<ExpressionRef> = values
        .into_iter()
        .map(|v| Expression::constant(v, FieldType::bigint()).into_ref())
        .collect();

    let list = conv.expressions_to_wire_list(&exprs);
    assert_eq!(list.len(), exprs.len());
    let split = conv.expressions_to_wire(&exprs);
    assert_eq!(split.pushed.len() + split.remained.len(), exprs.len());
    assert_eq!(split.pushed.len(), list.iter().filter(|w| w.is_some()).count());
    assert!(sink.is_empty());
    Ok(())
}

// ========== VALUES AND TYPES ==========

#[test]
fn test_unknown_collation_uses_default_id() {
    let session = SessionContext::default();
    let oracle = CapabilityProfile::modern();
    let ft = FieldType::varchar(32).with_charset("utf8mb4", "klingon_ci");
    let expr = Expression::constant(Value::string("x"), ft);

    let wire = WireConverter::new(&oracle, &session).expr_to_wire(&expr).unwrap();
    let field_type = wire.field_type.unwrap();
    assert_eq!(field_type.collate, collation_to_proto("utf8_bin"));
    assert_eq!(field_type.collate, 83);
    assert_eq!(field_type.charset, "utf8mb4");
}

#[test]
fn test_timestamp_is_normalized_to_utc() -> PushdownResult<()> {
    let session = SessionContext::from_json(r#"{"time_zone": "+08:00"}"#)?;
    let oracle = CapabilityProfile::modern();
    let conv = WireConverter::new(&oracle, &session);

    let ts = Expression::constant(
        Value::timestamp("2021-03-04 10:00:00")?,
        FieldType::new(LogicalType::Timestamp),
    );
    let expected = Time::parse("2021-03-04 02:00:00", TimeKind::Timestamp, 6)?.to_packed_u64()?;
    assert_eq!(conv.expr_to_wire(&ts).unwrap().val, uint_bytes(expected));

    // Datetime values carry no zone and are sent as written
    let dt = Expression::constant(
        Value::datetime("2021-03-04 10:00:00")?,
        FieldType::new(LogicalType::Datetime),
    );
    let expected = Time::parse("2021-03-04 10:00:00", TimeKind::Datetime, 6)?.to_packed_u64()?;
    assert_eq!(conv.expr_to_wire(&dt).unwrap().val, uint_bytes(expected));
    Ok(())
}

#[test]
fn test_named_zone_normalization_follows_dst() -> PushdownResult<()> {
    let session = SessionContext::from_json(r#"{"time_zone": "America/New_York"}"#)?;
    let oracle = CapabilityProfile::modern();
    let conv = WireConverter::new(&oracle, &session);

    for (local, utc) in [
        ("2021-01-15 12:00:00", "2021-01-15 17:00:00"),
        ("2021-07-15 12:00:00", "2021-07-15 16:00:00"),
    ] {
        let ts = Expression::constant(Value::timestamp(local)?, FieldType::new(LogicalType::Timestamp));
        let expected = Time::parse(utc, TimeKind::Timestamp, 6)?.to_packed_u64()?;
        assert_eq!(conv.expr_to_wire(&ts).unwrap().val, uint_bytes(expected), "{}", local);
    }
    Ok(())
}

#[test]
fn test_skipped_wall_clock_stays_local() -> PushdownResult<()> {
    let session = SessionContext::with_time_zone("America/New_York")?;
    let oracle = CapabilityProfile::modern();
    let sink = CollectingDiagnostics::new();
    let conv = WireConverter::new(&oracle, &session).with_diagnostics(&sink);

    let filter = call(
        names::GE,
        sig::GE_INT,
        vec![
            column(0, 1, LogicalType::Timestamp),
            Expression::constant(
                Value::timestamp("2021-03-14 02:15:00")?,
                FieldType::new(LogicalType::Timestamp),
            )
            .into_ref(),
        ],
    );
    let split = conv.expressions_to_wire(&[filter]);
    assert!(split.condition.is_none());
    assert_eq!(split.remained.len(), 1);
    assert!(matches!(
        sink.take().as_slice(),
        [Diagnostic::TimeZoneConversionFailed { .. }]
    ));
    Ok(())
}

#[test]
fn test_nested_failure_keeps_whole_filter_local() {
    let session = SessionContext::default();
    let oracle = CapabilityProfile::modern();

    let or = call(
        names::LOGIC_OR,
        sig::LOGICAL_OR,
        vec![
            call(names::EQ, sig::EQ_INT, vec![column(0, 1, LogicalType::LongLong), int(1)]),
            call(names::IS_NULL, sig::INT_IS_NULL, vec![column(1, 2, LogicalType::Geometry)]),
        ],
    );
    let split = expressions_to_wire(&session, &oracle, &[or.clone()]);
    assert!(split.condition.is_none());
    assert!(split.pushed.is_empty());
    assert_eq!(split.remained, vec![or]);
}

#[test]
fn test_decimal_constants_round_and_derive() -> PushdownResult<()> {
    let session = SessionContext::default();
    let oracle = CapabilityProfile::modern();
    let conv = WireConverter::new(&oracle, &session);
    let constant = |value: Value| Expression::constant(value, FieldType::decimal(5, 2));

    // Rounds to zero at the declared scale and must match a plain zero
    let tiny = conv
        .expr_to_wire(&constant(Value::decimal(Decimal::from_str("-0.001").unwrap(), 5, 2)))
        .unwrap();
    let zero = conv
        .expr_to_wire(&constant(Value::decimal(Decimal::ZERO, 5, 2)))
        .unwrap();
    assert_eq!(tiny.val, zero.val);

    // Undeclared length keeps every fractional digit of the value
    let undeclared = conv
        .expr_to_wire(&constant(Value::decimal(Decimal::from_str("9.99").unwrap(), 0, 1)))
        .unwrap();
    assert_eq!(undeclared.val[..2], [3u8, 2]);
    Ok(())
}

#[test]
fn test_unpackable_timestamp_is_reported() -> PushdownResult<()> {
    let session = SessionContext::with_offset_seconds(3600)?;
    let oracle = CapabilityProfile::modern();
    let sink = CollectingDiagnostics::new();
    let conv = WireConverter::new(&oracle, &session).with_diagnostics(&sink);

    // Shifting to UTC moves the value into year -1
    let ts = Expression::constant(
        Value::timestamp("0000-01-01 00:30:00")?,
        FieldType::new(LogicalType::Timestamp),
    );
    assert_eq!(conv.expr_to_wire(&ts), None);
    let diagnostics = sink.take();
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], Diagnostic::EncodeFailed { .. }));
    Ok(())
}

#[test]
fn test_unbound_parameter_is_reported() {
    let session = SessionContext::default();
    let oracle = CapabilityProfile::modern();
    let sink = CollectingDiagnostics::new();
    let conv = WireConverter::new(&oracle, &session).with_diagnostics(&sink);

    let filter = call(
        names::EQ,
        sig::EQ_INT,
        vec![column(0, 1, LogicalType::LongLong), Expression::param_marker(2, FieldType::bigint()).into_ref()],
    );
    let split = conv.expressions_to_wire(&[filter]);
    assert_eq!(split.remained.len(), 1);
    assert!(matches!(sink.take().as_slice(), [Diagnostic::ConstantEvalFailed { .. }]));
}

// ========== AGGREGATES AND BY-ITEMS ==========

#[test]
fn test_aggregate_and_group_by() {
    let session = SessionContext::default();
    let oracle = CapabilityProfile::modern();
    let conv = WireConverter::new(&oracle, &session);

    let key = column(0, 1, LogicalType::Varchar);
    let count = AggregateFunction::new("count", vec![int(1)], FieldType::bigint());

    let agg = conv.agg_func_to_wire(&count).unwrap();
    assert_eq!(agg.tp, ExprType::Count);
    assert_eq!(agg.children, vec![conv.expr_to_wire(&int(1)).unwrap()]);

    let group = conv.group_by_item_to_wire(&key).unwrap();
    assert!(!group.desc);
    assert!(!group.encode_to_vec().unwrap().is_empty());

    let distinct = count.with_distinct(true);
    assert_eq!(conv.agg_func_to_wire(&distinct), None);
}

#[test]
fn test_wire_fragment_serializes() {
    let session = SessionContext::default();
    let oracle = CapabilityProfile::modern();
    let conv = WireConverter::new(&oracle, &session);

    let filter = call(names::GE, sig::GE_INT, vec![column(0, 1, LogicalType::LongLong), int(7)]);
    let wire = conv.expr_to_wire(&filter).unwrap();
    assert_eq!(wire.node_count(), 3);

    let first = wire.encode_to_vec().unwrap();
    let second = wire.clone().encode_to_vec().unwrap();
    assert_eq!(first, second);
}
