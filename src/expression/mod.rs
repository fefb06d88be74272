//! Expression system
//!
//! The expression trees the planner hands to the pushdown compiler: constants,
//! column references and scalar function calls, plus aggregate calls and the
//! list of functions eligible for remote evaluation.

pub mod aggregate;
pub mod expression;
pub mod function;

pub use aggregate::AggregateFunction;
pub use expression::*;
pub use function::is_pushdown_candidate;
