//! Diagnostics for expressions that had to stay local
//!
//! Capability gaps are an expected outcome and are only traced. Evaluation and
//! encoding failures point at an inconsistency upstream, so the converter
//! reports them to a [`DiagnosticSink`].

use crate::types::ValueKind;
use parking_lot::Mutex;

/// Why a constant could not be pushed down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The constant's value could not be computed
    ConstantEvalFailed { reason: String },
    /// The value has a wire form but could not be laid out in it
    EncodeFailed { kind: ValueKind, reason: String },
    /// A timestamp could not be moved from the session zone to UTC
    TimeZoneConversionFailed { reason: String },
}

/// Receives diagnostics from the converter
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::ConstantEvalFailed { reason } => {
                tracing::error!(error = %reason, "fail to eval constant");
            }
            Diagnostic::EncodeFailed { kind, reason } => {
                tracing::warn!(kind = %kind, error = %reason, "fail to encode value");
            }
            Diagnostic::TimeZoneConversionFailed { reason } => {
                tracing::warn!(error = %reason, "fail to convert time zone");
            }
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    events: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything collected so far
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.events.lock().clone()
    }

    /// Remove and return everything collected so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events.lock().push(diagnostic);
    }
}
