//! Splitting filter lists between the remote executor and the coordinator

use crate::expression::{Expression, ExpressionRef};
use crate::pushdown::capability::CapabilityOracle;
use crate::pushdown::converter::WireConverter;
use crate::pushdown::session::SessionContext;
use crate::wire::{ByItem, WireExpr};

/// Result of partitioning a conjunction of filters
#[derive(Debug, Clone, Default)]
pub struct PushdownSplit {
    /// Every pushed filter merged into one left-leaning `AND` chain
    pub condition: Option<WireExpr>,
    /// Filters the remote executor will evaluate, in input order
    pub pushed: Vec<ExpressionRef>,
    /// Filters the coordinator keeps, in input order
    pub remained: Vec<ExpressionRef>,
}

impl PushdownSplit {
    /// True when no filter had to stay with the coordinator
    pub fn is_fully_pushed(&self) -> bool {
        self.remained.is_empty()
    }
}

impl<'a> WireConverter<'a> {
    /// Partition `exprs` into pushed and remained filters
    ///
    /// Filters are tried in order. The first pushed filter becomes the
    /// condition and each later one is merged in as `And(condition, next)`.
    pub fn expressions_to_wire(&self, exprs: &[ExpressionRef]) -> PushdownSplit {
        let mut split = PushdownSplit::default();
        for expr in exprs {
            match self.expr_to_wire(expr) {
                Some(wire) => {
                    split.condition = Some(match split.condition.take() {
                        Some(acc) => WireExpr::and(acc, wire),
                        None => wire,
                    });
                    split.pushed.push(expr.clone());
                }
                None => split.remained.push(expr.clone()),
            }
        }
        tracing::debug!(
            pushed = split.pushed.len(),
            remained = split.remained.len(),
            "partitioned filters"
        );
        split
    }

    /// Convert each expression independently, keeping positions
    pub fn expressions_to_wire_list(&self, exprs: &[ExpressionRef]) -> Vec<Option<WireExpr>> {
        exprs.iter().map(|expr| self.expr_to_wire(expr)).collect()
    }

    /// Ascending by-item for a `GROUP BY` key
    pub fn group_by_item_to_wire(&self, expr: &Expression) -> Option<ByItem> {
        self.sort_by_item_to_wire(expr, false)
    }

    /// By-item for an `ORDER BY` key
    pub fn sort_by_item_to_wire(&self, expr: &Expression, desc: bool) -> Option<ByItem> {
        let expr = self.expr_to_wire(expr)?;
        Some(ByItem { expr, desc })
    }
}

/// Partition `exprs` with a converter that logs diagnostics through `tracing`
pub fn expressions_to_wire(
    session: &SessionContext,
    oracle: &dyn CapabilityOracle,
    exprs: &[ExpressionRef],
) -> PushdownSplit {
    WireConverter::new(oracle, session).expressions_to_wire(exprs)
}

/// Convert one expression with a converter that logs through `tracing`
pub fn expr_to_wire(
    session: &SessionContext,
    oracle: &dyn CapabilityOracle,
    expr: &Expression,
) -> Option<WireExpr> {
    WireConverter::new(oracle, session).expr_to_wire(expr)
}
