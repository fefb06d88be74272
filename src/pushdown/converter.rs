//! Expression to wire conversion
//!
//! Conversion is all-or-nothing per subtree: a node converts only when every
//! node below it converts, otherwise the caller gets `None` and the whole
//! subtree stays with the coordinator.

use crate::codec::datum::encode_value;
use crate::codec::field_type::encode_field_type;
use crate::codec::number::int_bytes;
use crate::common::constants::UNSTABLE_COLUMN_IDS;
use crate::common::error::PushdownError;
use crate::expression::{
    is_pushdown_candidate, AggregateFunction, ColumnRefExpression, ConstantExpression, Expression,
    ScalarFunctionExpression,
};
use crate::pushdown::capability::{CapabilityOracle, RequestType, SUB_TYPE_BASIC};
use crate::pushdown::diagnostics::{Diagnostic, DiagnosticSink, TracingDiagnostics};
use crate::pushdown::session::SessionContext;
use crate::types::ValueKind;
use crate::wire::{ExprType, WireExpr};

static TRACING_DIAGNOSTICS: TracingDiagnostics = TracingDiagnostics;

/// Converts expressions into wire nodes for one query compilation pass
#[derive(Clone, Copy)]
pub struct WireConverter<'a> {
    oracle: &'a dyn CapabilityOracle,
    session: &'a SessionContext,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> WireConverter<'a> {
    /// Create a converter that reports diagnostics through `tracing`
    pub fn new(oracle: &'a dyn CapabilityOracle, session: &'a SessionContext) -> Self {
        Self {
            oracle,
            session,
            diagnostics: &TRACING_DIAGNOSTICS,
        }
    }

    /// Send diagnostics to `sink` instead of `tracing`
    pub fn with_diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Session whose time zone and parameters constants are evaluated with
    pub fn session(&self) -> &SessionContext {
        self.session
    }

    /// Convert one expression, or `None` if any part of it cannot be pushed
    pub fn expr_to_wire(&self, expr: &Expression) -> Option<WireExpr> {
        match expr {
            Expression::Constant(constant) => self.constant_to_wire(constant),
            Expression::ColumnRef(column) => self.column_to_wire(column),
            Expression::ScalarFunction(func) => self.scalar_func_to_wire(func),
        }
    }

    fn constant_to_wire(&self, constant: &ConstantExpression) -> Option<WireExpr> {
        let value = match constant.eval(self.session) {
            Ok(value) => value,
            Err(err) => {
                self.diagnostics.emit(Diagnostic::ConstantEvalFailed {
                    reason: err.to_string(),
                });
                return None;
            }
        };

        match encode_value(&value, self.session, self.oracle) {
            Ok(Some(encoded)) => Some(WireExpr::leaf(
                encoded.tp,
                encoded.val,
                Some(encode_field_type(constant.return_type())),
            )),
            Ok(None) => {
                tracing::trace!(kind = %value.kind(), "constant kind cannot be pushed");
                None
            }
            Err(err) => {
                self.report_encode_failure(value.kind(), err);
                None
            }
        }
    }

    fn column_to_wire(&self, column: &ColumnRefExpression) -> Option<WireExpr> {
        if !self.oracle.supports_expr(RequestType::Select, ExprType::ColumnRef) {
            tracing::trace!("remote executor rejects column references");
            return None;
        }
        let ft = column.return_type();
        if !ft.tp.is_remote_representable() {
            tracing::trace!(column = column.name(), tp = %ft.tp, "column type cannot be pushed");
            return None;
        }

        if self.oracle.is_request_type_supported(RequestType::Dag, SUB_TYPE_BASIC) {
            let offset = i64::try_from(column.index()).ok()?;
            return Some(WireExpr::leaf(
                ExprType::ColumnRef,
                int_bytes(offset),
                Some(encode_field_type(ft)),
            ));
        }

        // Legacy requests address columns by id, so the column needs one
        let id = column.id();
        if UNSTABLE_COLUMN_IDS.contains(&id) {
            tracing::trace!(column = column.name(), id, "column has no stable id");
            return None;
        }
        Some(WireExpr::leaf(ExprType::ColumnRef, int_bytes(id), None))
    }

    fn scalar_func_to_wire(&self, func: &ScalarFunctionExpression) -> Option<WireExpr> {
        if !is_pushdown_candidate(func.name()) {
            tracing::trace!(function = func.name(), "function is not a pushdown candidate");
            return None;
        }
        let sig = func.signature().filter(|sig| *sig >= 0)?;

        let children = func
            .children()
            .iter()
            .map(|child| self.expr_to_wire(child))
            .collect::<Option<Vec<_>>>()?;

        Some(WireExpr::scalar_func(
            sig,
            children,
            encode_field_type(func.return_type()),
        ))
    }

    /// Convert an aggregate call, or `None` if it must run locally
    pub fn agg_func_to_wire(&self, agg: &AggregateFunction) -> Option<WireExpr> {
        if agg.is_distinct() {
            return None;
        }
        let tp = agg.expr_type()?;
        if !self.oracle.supports_expr(RequestType::Select, tp) {
            tracing::trace!(aggregate = agg.name(), "remote executor rejects aggregate");
            return None;
        }

        let children = agg
            .args()
            .iter()
            .map(|arg| self.expr_to_wire(arg))
            .collect::<Option<Vec<_>>>()?;

        Some(WireExpr {
            tp,
            val: Vec::new(),
            children,
            sig: None,
            field_type: Some(encode_field_type(agg.return_type())),
        })
    }

    fn report_encode_failure(&self, kind: ValueKind, err: PushdownError) {
        let diagnostic = match err {
            PushdownError::TimeZone(reason) => Diagnostic::TimeZoneConversionFailed { reason },
            other => Diagnostic::EncodeFailed {
                kind,
                reason: other.to_string(),
            },
        };
        self.diagnostics.emit(diagnostic);
    }
}
