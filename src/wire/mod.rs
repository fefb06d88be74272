//! Wire-format nodes sent to the remote executor
//!
//! A converted expression is a tree of [`WireExpr`] nodes. Leaves carry an
//! encoded value in `val`; scalar functions carry a signature code and their
//! children. The tree is embedded by the transport layer into a larger
//! coprocessor request.

use crate::common::error::PushdownResult;
use serde::{Serialize, Serializer};
use std::fmt;

/// Tag of a wire node, numbered as the remote executor numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprType {
    // Values
    Null,
    Int64,
    Uint64,
    Float32,
    Float64,
    String,
    Bytes,

    // Mysql specific types
    MysqlBit,
    MysqlDecimal,
    MysqlDuration,
    MysqlEnum,
    MysqlHex,
    MysqlSet,
    MysqlTime,
    MysqlJson,

    ValueList,
    ColumnRef,

    // Aggregate functions
    Count,
    Sum,
    Avg,
    Min,
    Max,
    First,
    GroupConcat,
    AggBitAnd,
    AggBitOr,
    AggBitXor,

    // Logic operators
    And,
    Or,
    Xor,

    ScalarFunc,
}

impl ExprType {
    /// Numeric tag on the wire
    pub fn code(self) -> i32 {
        match self {
            ExprType::Null => 0,
            ExprType::Int64 => 1,
            ExprType::Uint64 => 2,
            ExprType::Float32 => 3,
            ExprType::Float64 => 4,
            ExprType::String => 5,
            ExprType::Bytes => 6,
            ExprType::MysqlBit => 101,
            ExprType::MysqlDecimal => 102,
            ExprType::MysqlDuration => 103,
            ExprType::MysqlEnum => 104,
            ExprType::MysqlHex => 105,
            ExprType::MysqlSet => 106,
            ExprType::MysqlTime => 107,
            ExprType::MysqlJson => 108,
            ExprType::ValueList => 151,
            ExprType::ColumnRef => 201,
            ExprType::Count => 3001,
            ExprType::Sum => 3002,
            ExprType::Avg => 3003,
            ExprType::Min => 3004,
            ExprType::Max => 3005,
            ExprType::First => 3006,
            ExprType::GroupConcat => 3007,
            ExprType::AggBitAnd => 3008,
            ExprType::AggBitOr => 3009,
            ExprType::AggBitXor => 3010,
            ExprType::And => 2301,
            ExprType::Or => 2302,
            ExprType::Xor => 2303,
            ExprType::ScalarFunc => 10000,
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl Serialize for ExprType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// Type record sent alongside a wire node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WireFieldType {
    pub tp: i32,
    pub flag: u32,
    pub flen: i32,
    pub decimal: i32,
    pub charset: String,
    /// Collation id from the collation table
    pub collate: i32,
}

/// One node of a converted expression tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireExpr {
    pub tp: ExprType,
    pub val: Vec<u8>,
    pub children: Vec<WireExpr>,
    /// Signature code, present only on scalar functions
    pub sig: Option<i32>,
    pub field_type: Option<WireFieldType>,
}

impl WireExpr {
    /// A leaf carrying an encoded value
    pub fn leaf(tp: ExprType, val: Vec<u8>, field_type: Option<WireFieldType>) -> Self {
        Self {
            tp,
            val,
            children: Vec::new(),
            sig: None,
            field_type,
        }
    }

    /// A scalar function call with already converted children
    pub fn scalar_func(sig: i32, children: Vec<WireExpr>, field_type: WireFieldType) -> Self {
        Self {
            tp: ExprType::ScalarFunc,
            val: Vec::new(),
            children,
            sig: Some(sig),
            field_type: Some(field_type),
        }
    }

    /// Conjunction of two converted predicates
    pub fn and(left: WireExpr, right: WireExpr) -> Self {
        Self {
            tp: ExprType::And,
            val: Vec::new(),
            children: vec![left, right],
            sig: None,
            field_type: None,
        }
    }

    /// Number of nodes in this tree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(WireExpr::node_count).sum::<usize>()
    }

    /// Serialize this fragment for embedding in a request message
    pub fn encode_to_vec(&self) -> PushdownResult<Vec<u8>> {
        Ok(bincode::serde::encode_to_vec(self, bincode::config::standard())?)
    }
}

/// A GROUP BY or ORDER BY item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ByItem {
    pub expr: WireExpr,
    pub desc: bool,
}

impl ByItem {
    pub fn encode_to_vec(&self) -> PushdownResult<Vec<u8>> {
        Ok(bincode::serde::encode_to_vec(self, bincode::config::standard())?)
    }
}
