//! Sort directives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an order reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Measure,
    Dimension,
    Column,
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullsOrder {
    First,
    Last,
}

/// A member name, raw column name, or 1-based output position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderReference {
    Position(u32),
    Name(String),
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderReference::Position(p) => write!(f, "{}", p),
            OrderReference::Name(n) => f.write_str(n),
        }
    }
}

/// A named sort directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSequence {
    pub name: String,
    pub semantic_type: SemanticType,
    pub reference: OrderReference,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nulls: Option<NullsOrder>,
}

impl OrderSequence {
    pub fn by_measure(name: impl Into<String>, measure: impl Into<String>, order_type: OrderType) -> Self {
        Self::named(name, SemanticType::Measure, OrderReference::Name(measure.into()), order_type)
    }

    pub fn by_dimension(name: impl Into<String>, dimension: impl Into<String>, order_type: OrderType) -> Self {
        Self::named(name, SemanticType::Dimension, OrderReference::Name(dimension.into()), order_type)
    }

    pub fn by_column(name: impl Into<String>, column: impl Into<String>, order_type: OrderType) -> Self {
        Self::named(name, SemanticType::Column, OrderReference::Name(column.into()), order_type)
    }

    pub fn by_position(name: impl Into<String>, position: u32, order_type: OrderType) -> Self {
        Self::named(name, SemanticType::Position, OrderReference::Position(position), order_type)
    }

    fn named(
        name: impl Into<String>,
        semantic_type: SemanticType,
        reference: OrderReference,
        order_type: OrderType,
    ) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            reference,
            order_type,
            nulls: None,
        }
    }

    pub fn with_nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = Some(nulls);
        self
    }

    /// The referenced member name, for measure/dimension orderings.
    pub fn member_name(&self) -> Option<&str> {
        match (&self.semantic_type, &self.reference) {
            (SemanticType::Measure | SemanticType::Dimension, OrderReference::Name(n)) => Some(n),
            _ => None,
        }
    }
}
