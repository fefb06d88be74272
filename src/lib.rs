//! Prism Pushdown - expression pushdown compiler
//!
//! Compiles planner expressions into the wire form understood by a remote
//! storage-side executor. Each expression is either converted completely or
//! left for the coordinator, and a filter list is split into a pushed
//! conjunction and a remainder.
//!
pub mod codec;
pub mod common;
pub mod expression;
pub mod pushdown;
pub mod types;
pub mod wire;

// Re-export common types for convenience
pub use common::{PushdownError, PushdownResult};

// Re-export type system for convenience
pub use types::{FieldType, LogicalType, Time, TimeKind, Value, ValueKind};

// Re-export expression system for convenience
pub use expression::{AggregateFunction, Expression, ExpressionRef};

// Re-export the compiler entry points
pub use pushdown::{
    expr_to_wire, expressions_to_wire, CapabilityOracle, CapabilityProfile, CollectingDiagnostics,
    Diagnostic, DiagnosticSink, PushdownSplit, RequestType, SessionContext, SessionTimeZone,
    TracingDiagnostics, WireConverter,
};
pub use wire::{ByItem, ExprType, WireExpr, WireFieldType};
