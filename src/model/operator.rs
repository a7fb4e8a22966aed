//! Comparison operators and the value shapes they expect.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The shape of the value paired with an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// No compare value (IS NULL / IS NOT NULL).
    None,
    /// A single scalar or column.
    Scalar,
    /// A `[min, max]` pair (BETWEEN).
    Pair,
    /// A set of scalars (IN / NOT IN).
    Set,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueShape::None => "no",
            ValueShape::Scalar => "scalar",
            ValueShape::Pair => "range",
            ValueShape::Set => "list",
        };
        f.write_str(name)
    }
}

/// Comparison operators available in predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "BETWEEN")]
    Between,
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 12] = [
        ComparisonOperator::Eq,
        ComparisonOperator::NotEq,
        ComparisonOperator::Gt,
        ComparisonOperator::Lt,
        ComparisonOperator::GtEq,
        ComparisonOperator::LtEq,
        ComparisonOperator::In,
        ComparisonOperator::NotIn,
        ComparisonOperator::Like,
        ComparisonOperator::Between,
        ComparisonOperator::IsNull,
        ComparisonOperator::IsNotNull,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::NotEq => "!=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::GtEq => ">=",
            ComparisonOperator::LtEq => "<=",
            ComparisonOperator::In => "IN",
            ComparisonOperator::NotIn => "NOT IN",
            ComparisonOperator::Like => "LIKE",
            ComparisonOperator::Between => "BETWEEN",
            ComparisonOperator::IsNull => "IS NULL",
            ComparisonOperator::IsNotNull => "IS NOT NULL",
        }
    }

    /// The value shape this operator expects.
    pub fn value_shape(&self) -> ValueShape {
        match self {
            ComparisonOperator::IsNull | ComparisonOperator::IsNotNull => ValueShape::None,
            ComparisonOperator::Between => ValueShape::Pair,
            ComparisonOperator::In | ComparisonOperator::NotIn => ValueShape::Set,
            _ => ValueShape::Scalar,
        }
    }

    pub fn takes_value(&self) -> bool {
        self.value_shape() != ValueShape::None
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
