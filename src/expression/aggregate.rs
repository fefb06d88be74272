//! Aggregate function calls for GROUP BY pushdown

use crate::expression::ExpressionRef;
use crate::types::FieldType;
use crate::wire::ExprType;

/// An aggregate call such as `SUM(a)` or `COUNT(DISTINCT b)`
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateFunction {
    name: String,
    args: Vec<ExpressionRef>,
    distinct: bool,
    return_type: FieldType,
}

impl AggregateFunction {
    pub fn new(name: impl Into<String>, args: Vec<ExpressionRef>, return_type: FieldType) -> Self {
        Self {
            name: name.into(),
            args,
            distinct: false,
            return_type,
        }
    }

    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[ExpressionRef] {
        &self.args
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn return_type(&self) -> &FieldType {
        &self.return_type
    }

    /// Wire tag of this aggregate, if the protocol defines one
    pub fn expr_type(&self) -> Option<ExprType> {
        let tp = match self.name.to_ascii_lowercase().as_str() {
            "count" => ExprType::Count,
            "sum" => ExprType::Sum,
            "avg" => ExprType::Avg,
            "min" => ExprType::Min,
            "max" => ExprType::Max,
            "firstrow" => ExprType::First,
            "group_concat" => ExprType::GroupConcat,
            "bit_and" => ExprType::AggBitAnd,
            "bit_or" => ExprType::AggBitOr,
            "bit_xor" => ExprType::AggBitXor,
            _ => return None,
        };
        Some(tp)
    }
}
