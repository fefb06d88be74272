//! Pushdown compiler
//!
//! Decides which expressions the remote executor can evaluate and converts
//! them to wire form:
//! - capability: what the remote executor supports
//! - session: per-session settings such as the time zone
//! - converter: expression to wire conversion
//! - partition: splitting filter lists and building by-items
//! - diagnostics: reporting conversion failures

pub mod capability;
pub mod converter;
pub mod diagnostics;
pub mod partition;
pub mod session;

pub use capability::{CapabilityOracle, CapabilityProfile, RequestType};
pub use converter::WireConverter;
pub use diagnostics::{CollectingDiagnostics, Diagnostic, DiagnosticSink, TracingDiagnostics};
pub use partition::{expr_to_wire, expressions_to_wire, PushdownSplit};
pub use session::{parse_time_zone, SessionContext, SessionTimeZone};
