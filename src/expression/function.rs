//! Function names and the pushdown allow-list
//!
//! Being on the allow-list is necessary but not sufficient for pushdown: the
//! call also needs a remote signature code and every argument must convert.

/// Lowercase names of the scalar functions the converter knows about
pub mod names {
    // logical functions
    pub const LOGIC_AND: &str = "and";
    pub const LOGIC_OR: &str = "or";
    pub const UNARY_NOT: &str = "not";

    // compare functions
    pub const LT: &str = "lt";
    pub const LE: &str = "le";
    pub const EQ: &str = "eq";
    pub const NE: &str = "ne";
    pub const GE: &str = "ge";
    pub const GT: &str = "gt";
    pub const NULL_EQ: &str = "nulleq";
    pub const IN: &str = "in";
    pub const IS_NULL: &str = "isnull";
    pub const LIKE: &str = "like";

    // arithmetical functions
    pub const PLUS: &str = "plus";
    pub const MINUS: &str = "minus";
    pub const MUL: &str = "mul";
    pub const DIV: &str = "div";

    // control flow functions
    pub const CASE: &str = "case";
    pub const IF: &str = "if";
    pub const IFNULL: &str = "ifnull";
    pub const COALESCE: &str = "coalesce";

    // json functions
    pub const JSON_TYPE: &str = "json_type";
    pub const JSON_EXTRACT: &str = "json_extract";
    pub const JSON_UNQUOTE: &str = "json_unquote";
    pub const JSON_OBJECT: &str = "json_object";
    pub const JSON_ARRAY: &str = "json_array";
    pub const JSON_MERGE: &str = "json_merge";
    pub const JSON_SET: &str = "json_set";
    pub const JSON_INSERT: &str = "json_insert";
    pub const JSON_REPLACE: &str = "json_replace";
    pub const JSON_REMOVE: &str = "json_remove";

    // date functions
    pub const DATE_FORMAT: &str = "date_format";
}

/// Signature codes of some remote function implementations
pub mod sig {
    pub const LT_INT: i32 = 100;
    pub const LT_REAL: i32 = 101;
    pub const LT_DECIMAL: i32 = 102;
    pub const LT_STRING: i32 = 103;
    pub const LT_TIME: i32 = 104;
    pub const LE_INT: i32 = 110;
    pub const GT_INT: i32 = 120;
    pub const GE_INT: i32 = 130;
    pub const EQ_INT: i32 = 140;
    pub const EQ_STRING: i32 = 143;
    pub const NE_INT: i32 = 150;
    pub const NULL_EQ_INT: i32 = 160;
    pub const PLUS_INT: i32 = 203;
    pub const MINUS_INT: i32 = 207;
    pub const MULTIPLY_INT: i32 = 210;
    pub const DIVIDE_REAL: i32 = 211;
    pub const LOGICAL_AND: i32 = 3101;
    pub const LOGICAL_OR: i32 = 3102;
    pub const UNARY_NOT: i32 = 3104;
    pub const INT_IS_NULL: i32 = 3113;
    pub const IN_INT: i32 = 4001;
    pub const IF_NULL_INT: i32 = 4101;
    pub const IF_INT: i32 = 4107;
    pub const COALESCE_INT: i32 = 4201;
    pub const CASE_WHEN_INT: i32 = 4208;
    pub const LIKE_SIG: i32 = 4310;
    pub const JSON_EXTRACT_SIG: i32 = 5002;
    pub const DATE_FORMAT_SIG: i32 = 6001;
}

use names::*;

#[rustfmt::skip]
static PUSHDOWN_CANDIDATES: &[&str] = &[
    LOGIC_AND, LOGIC_OR, UNARY_NOT,
    LT, LE, EQ, NE, GE, GT, NULL_EQ, IN, IS_NULL, LIKE,
    PLUS, MINUS, MUL, DIV,
    CASE, IF, IFNULL, COALESCE,
    JSON_TYPE, JSON_EXTRACT, JSON_UNQUOTE, JSON_OBJECT, JSON_ARRAY,
    JSON_MERGE, JSON_SET, JSON_INSERT, JSON_REPLACE, JSON_REMOVE,
    DATE_FORMAT,
];

/// Whether a function is eligible to be evaluated by the remote executor
pub fn is_pushdown_candidate(name: &str) -> bool {
    PUSHDOWN_CANDIDATES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}
