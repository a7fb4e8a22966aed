//! Error types for the metric schema model.
//!
//! Schema construction is deliberately lenient: incomplete condition branches
//! and unmatched join candidates are tolerated in memory. The errors below
//! cover structural violations of aggregate invariants (names, join pairs,
//! predicate shapes) and evaluation failures in the reference evaluator.

use crate::model::{ComparisonOperator, ValueShape};

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Which member collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Dimensions,
    Measures,
    Filters,
    Order,
    Joins,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Collection::Dimensions => "dimensions",
            Collection::Measures => "measures",
            Collection::Filters => "filters",
            Collection::Order => "order",
            Collection::Joins => "joins",
        };
        f.write_str(name)
    }
}

/// Structural errors raised by the aggregate and its builders.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("{collection} entry at index {index} has an empty name")]
    EmptyName { collection: Collection, index: usize },

    #[error("duplicate name '{name}' in {collection}")]
    DuplicateName { collection: Collection, name: String },

    #[error("index {index} is out of range for {collection} (len {len})")]
    IndexOutOfRange {
        collection: Collection,
        index: usize,
        len: usize,
    },

    #[error("tables '{left}' and '{right}' already have a user-authored join")]
    DuplicateJoin { left: String, right: String },

    #[error("operator {operator} expects a {expected} value: {message}")]
    InvalidPredicate {
        operator: ComparisonOperator,
        expected: ValueShape,
        message: String,
    },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Serialization(err.to_string())
    }
}

/// Errors raised while evaluating a condition tree against a row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("transform {0} cannot be evaluated locally")]
    UnsupportedTransform(String),

    #[error("transform {function} expects parameter '{param}'")]
    MissingParam { function: String, param: String },

    #[error("transform {function} cannot be applied to {value}")]
    InvalidInput { function: String, value: String },

    #[error("predicate on '{column}' is incomplete: {message}")]
    IncompletePredicate { column: String, message: String },

    #[error("matched branch {0} has no return value")]
    MissingReturn(usize),
}
