//! Core expression types consumed by the pushdown compiler

use crate::common::error::PushdownResult;
use crate::evaluation_err;
use crate::pushdown::session::SessionContext;
use crate::types::{FieldType, Value};
use std::fmt;
use std::sync::Arc;

/// Expression reference type
pub type ExpressionRef = Arc<Expression>;

/// Expression enum that encompasses all expression kinds the converter reads
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(ConstantExpression),
    ColumnRef(ColumnRefExpression),
    ScalarFunction(ScalarFunctionExpression),
}

impl Expression {
    /// Literal constant
    pub fn constant(value: Value, return_type: FieldType) -> Self {
        Expression::Constant(ConstantExpression::new(value, return_type))
    }

    /// Prepared statement parameter, resolved from the session when evaluated
    pub fn param_marker(index: usize, return_type: FieldType) -> Self {
        Expression::Constant(ConstantExpression::param_marker(index, return_type))
    }

    /// Column reference
    pub fn column(index: usize, id: i64, name: impl Into<String>, return_type: FieldType) -> Self {
        Expression::ColumnRef(ColumnRefExpression::new(index, id, name.into(), return_type))
    }

    /// Scalar function call
    pub fn function(
        name: impl Into<String>,
        children: Vec<ExpressionRef>,
        return_type: FieldType,
        signature: Option<i32>,
    ) -> Self {
        Expression::ScalarFunction(ScalarFunctionExpression::new(
            name.into(),
            children,
            return_type,
            signature,
        ))
    }

    /// Get the return type of this expression
    pub fn return_type(&self) -> &FieldType {
        match self {
            Expression::Constant(expr) => &expr.return_type,
            Expression::ColumnRef(expr) => &expr.return_type,
            Expression::ScalarFunction(expr) => &expr.return_type,
        }
    }

    /// Get the children of this expression
    pub fn children(&self) -> &[ExpressionRef] {
        match self {
            Expression::Constant(_) | Expression::ColumnRef(_) => &[],
            Expression::ScalarFunction(expr) => &expr.children,
        }
    }

    pub fn into_ref(self) -> ExpressionRef {
        Arc::new(self)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(expr) => match &expr.value {
                ConstantValue::Literal(value) => write!(f, "{}", value),
                ConstantValue::ParamMarker(index) => write!(f, "?{}", index),
            },
            Expression::ColumnRef(expr) => write!(f, "{}", expr.name),
            Expression::ScalarFunction(expr) => {
                write!(f, "{}(", expr.name)?;
                for (i, child) in expr.children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Where a constant's value comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Literal(Value),
    /// Index into the session's prepared statement parameters
    ParamMarker(usize),
}

/// Constant value expression
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpression {
    value: ConstantValue,
    return_type: FieldType,
}

impl ConstantExpression {
    pub fn new(value: Value, return_type: FieldType) -> Self {
        Self {
            value: ConstantValue::Literal(value),
            return_type,
        }
    }

    pub fn param_marker(index: usize, return_type: FieldType) -> Self {
        Self {
            value: ConstantValue::ParamMarker(index),
            return_type,
        }
    }

    pub fn value(&self) -> &ConstantValue {
        &self.value
    }

    pub fn return_type(&self) -> &FieldType {
        &self.return_type
    }

    /// Compute the constant's value
    pub fn eval(&self, session: &SessionContext) -> PushdownResult<Value> {
        match &self.value {
            ConstantValue::Literal(value) => Ok(value.clone()),
            ConstantValue::ParamMarker(index) => session.param_value(*index).cloned().ok_or_else(|| {
                evaluation_err!(
                    "parameter {} is not bound ({} parameters set)",
                    index,
                    session.param_count()
                )
            }),
        }
    }
}

/// Column reference expression
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRefExpression {
    /// Offset of the column in the scanned schema
    index: usize,
    /// Stable column id in the table definition; 0 or -1 when the column has
    /// none (computed or virtual columns)
    id: i64,
    name: String,
    return_type: FieldType,
}

impl ColumnRefExpression {
    pub fn new(index: usize, id: i64, name: String, return_type: FieldType) -> Self {
        Self {
            index,
            id,
            name,
            return_type,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &FieldType {
        &self.return_type
    }
}

/// Scalar function call expression
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarFunctionExpression {
    name: String,
    children: Vec<ExpressionRef>,
    return_type: FieldType,
    /// Remote implementation code, set only for functions the remote
    /// executor implements
    signature: Option<i32>,
}

impl ScalarFunctionExpression {
    pub fn new(
        name: String,
        children: Vec<ExpressionRef>,
        return_type: FieldType,
        signature: Option<i32>,
    ) -> Self {
        Self {
            name,
            children,
            return_type,
            signature,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[ExpressionRef] {
        &self.children
    }

    pub fn return_type(&self) -> &FieldType {
        &self.return_type
    }

    pub fn signature(&self) -> Option<i32> {
        self.signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::PushdownError;

    #[test]
    fn test_constant_eval() {
        let session = SessionContext::default().with_param_values(vec![Value::Int64(9)]);
        let literal = ConstantExpression::new(Value::Int64(1), FieldType::bigint());
        assert_eq!(literal.eval(&session).unwrap(), Value::Int64(1));

        let bound = ConstantExpression::param_marker(0, FieldType::bigint());
        assert_eq!(bound.eval(&session).unwrap(), Value::Int64(9));

        let unbound = ConstantExpression::param_marker(3, FieldType::bigint());
        assert!(matches!(unbound.eval(&session), Err(PushdownError::Evaluation(_))));
    }

    #[test]
    fn test_children_and_display() {
        let a = Expression::column(0, 1, "a", FieldType::bigint()).into_ref();
        let one = Expression::constant(Value::Int64(1), FieldType::bigint()).into_ref();
        let gt = Expression::function("gt", vec![a, one], FieldType::boolean(), Some(120));

        assert_eq!(gt.children().len(), 2);
        assert_eq!(gt.return_type(), &FieldType::boolean());
        assert_eq!(gt.to_string(), "gt(a, 1)");
        assert!(gt.children()[0].children().is_empty());
    }
}
