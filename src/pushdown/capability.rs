//! Remote executor capabilities
//!
//! The converter never assumes what the remote executor can do; it asks a
//! [`CapabilityOracle`] per construct. Requests come in two protocol
//! generations: the legacy [`RequestType::Select`] generation addresses
//! columns by column id, the modern [`RequestType::Dag`] generation addresses
//! them by schema offset and covers more value types.

use crate::common::error::PushdownResult;
use crate::wire::ExprType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of coprocessor request, which doubles as the protocol generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Legacy table scan request
    Select,
    /// Legacy index scan request
    Index,
    /// Operator tree request
    Dag,
    Analyze,
    Checksum,
}

impl RequestType {
    pub fn code(self) -> i64 {
        match self {
            RequestType::Select => 101,
            RequestType::Index => 102,
            RequestType::Dag => 103,
            RequestType::Analyze => 104,
            RequestType::Checksum => 105,
        }
    }
}

/// Basic requests; under [`RequestType::Dag`] this also means offset-based
/// column references
pub const SUB_TYPE_BASIC: i64 = 0;
pub const SUB_TYPE_DESC: i64 = 10000;
pub const SUB_TYPE_GROUP_BY: i64 = 10001;
pub const SUB_TYPE_TOP_N: i64 = 10002;
pub const SUB_TYPE_SIGNATURE: i64 = 10003;

/// Answers whether the connected remote executor supports a construct
///
/// `sub_type` is either one of the `SUB_TYPE_*` constants or the numeric code
/// of an [`ExprType`].
pub trait CapabilityOracle: Send + Sync {
    fn is_request_type_supported(&self, req_type: RequestType, sub_type: i64) -> bool;

    /// Whether an expression tag may be sent under a request type
    fn supports_expr(&self, req_type: RequestType, tp: ExprType) -> bool {
        self.is_request_type_supported(req_type, tp.code() as i64)
    }
}

/// A table-driven oracle describing one remote executor version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    /// Request types the remote executor accepts at all
    #[serde(default)]
    pub request_types: BTreeSet<RequestType>,
    /// Expression tag codes and extra sub types it understands
    #[serde(default)]
    pub sub_types: BTreeSet<i64>,
}

impl CapabilityProfile {
    /// Supports nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// A remote executor that only speaks the legacy generation
    pub fn legacy() -> Self {
        let mut sub_types: BTreeSet<i64> = [
            ExprType::Null,
            ExprType::Int64,
            ExprType::Uint64,
            ExprType::String,
            ExprType::Bytes,
            ExprType::MysqlDuration,
            ExprType::MysqlDecimal,
            ExprType::Float32,
            ExprType::Float64,
            ExprType::ColumnRef,
            ExprType::Count,
            ExprType::Sum,
            ExprType::Avg,
            ExprType::Min,
            ExprType::Max,
            ExprType::First,
        ]
        .iter()
        .map(|tp| tp.code() as i64)
        .collect();
        sub_types.insert(SUB_TYPE_DESC);

        Self {
            request_types: [RequestType::Select, RequestType::Index].into_iter().collect(),
            sub_types,
        }
    }

    /// A remote executor that speaks both generations
    pub fn modern() -> Self {
        let mut profile = Self::legacy();
        profile
            .request_types
            .extend([RequestType::Dag, RequestType::Analyze, RequestType::Checksum]);
        profile.sub_types.extend(
            [
                ExprType::MysqlTime,
                ExprType::GroupConcat,
                ExprType::AggBitAnd,
                ExprType::AggBitOr,
                ExprType::AggBitXor,
            ]
            .iter()
            .map(|tp| tp.code() as i64),
        );
        profile.sub_types.insert(SUB_TYPE_SIGNATURE);
        profile
    }

    /// Load a profile from its JSON description
    pub fn from_json(text: &str) -> PushdownResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_request_type(mut self, req_type: RequestType) -> Self {
        self.request_types.insert(req_type);
        self
    }

    pub fn with_expr_type(mut self, tp: ExprType) -> Self {
        self.sub_types.insert(tp.code() as i64);
        self
    }

    pub fn without_expr_type(mut self, tp: ExprType) -> Self {
        self.sub_types.remove(&(tp.code() as i64));
        self
    }
}

impl CapabilityOracle for CapabilityProfile {
    fn is_request_type_supported(&self, req_type: RequestType, sub_type: i64) -> bool {
        if !self.request_types.contains(&req_type) {
            return false;
        }
        match req_type {
            RequestType::Select | RequestType::Index | RequestType::Dag => match sub_type {
                SUB_TYPE_BASIC | SUB_TYPE_GROUP_BY | SUB_TYPE_TOP_N => true,
                other => self.sub_types.contains(&other),
            },
            RequestType::Analyze | RequestType::Checksum => true,
        }
    }
}
