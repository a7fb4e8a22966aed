//! Conditional expression trees (`WHEN ... THEN ... ELSE ...`).
//!
//! Branches may be incomplete while being edited: an unselected predicate
//! column or a missing `then_return` is kept in memory and left for the
//! downstream compiler to reject. The `else_return` fallback always exists.

use serde::{Deserialize, Serialize};

use super::column::ColumnField;
use super::operator::{ComparisonOperator, ValueShape};
use super::value::{Literal, Scalar, ValueRef};
use crate::error::{SchemaError, SchemaResult};

/// How additional predicates combine with the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    And,
    Or,
}

/// A `(field, operator, value)` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predicate {
    pub field: ColumnField,
    pub operator: ComparisonOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_value: Option<ValueRef>,
}

impl Predicate {
    /// Create a predicate, checking that the value matches the operator's shape.
    pub fn new(
        field: ColumnField,
        operator: ComparisonOperator,
        compare_value: Option<ValueRef>,
    ) -> SchemaResult<Self> {
        let predicate = Self {
            field,
            operator,
            compare_value,
        };
        predicate.check_shape()?;
        Ok(predicate)
    }

    /// A blank `= ''` predicate on an unselected column.
    pub fn empty() -> Self {
        Self {
            field: ColumnField::empty(),
            operator: ComparisonOperator::Eq,
            compare_value: Some(ValueRef::literal("")),
        }
    }

    pub fn is_null(field: ColumnField) -> Self {
        Self {
            field,
            operator: ComparisonOperator::IsNull,
            compare_value: None,
        }
    }

    pub fn is_not_null(field: ColumnField) -> Self {
        Self {
            field,
            operator: ComparisonOperator::IsNotNull,
            compare_value: None,
        }
    }

    /// Change the operator, resetting the value when the shape changes.
    pub fn with_operator(&self, operator: ComparisonOperator) -> Self {
        let shape = operator.value_shape();
        let compare_value = if shape == self.operator.value_shape() {
            self.compare_value.clone()
        } else {
            empty_value_for(shape)
        };
        Self {
            field: self.field.clone(),
            operator,
            compare_value,
        }
    }

    /// Verify the compare value agrees with the operator.
    pub fn check_shape(&self) -> SchemaResult<()> {
        let expected = self.operator.value_shape();
        let invalid = |message: &str| SchemaError::InvalidPredicate {
            operator: self.operator,
            expected,
            message: message.to_string(),
        };

        match (expected, &self.compare_value) {
            (ValueShape::None, None) => Ok(()),
            (ValueShape::None, Some(_)) => Err(invalid("null checks take no compare value")),
            (_, None) => Err(invalid("compare value is missing")),
            (ValueShape::Scalar, Some(ValueRef::Column(_))) => Ok(()),
            (ValueShape::Scalar, Some(ValueRef::Literal { value })) => match value {
                Literal::Scalar(_) => Ok(()),
                _ => Err(invalid("expected a single value")),
            },
            (ValueShape::Pair, Some(value)) => match value.as_literal().and_then(Literal::as_range) {
                Some(_) => Ok(()),
                None => Err(invalid("expected a [min, max] pair")),
            },
            (ValueShape::Set, Some(value)) => match value.as_literal() {
                Some(Literal::List(_)) => Ok(()),
                _ => Err(invalid("expected a list of values")),
            },
        }
    }

    /// Column fields referenced by this predicate.
    pub fn column_fields(&self) -> Vec<&ColumnField> {
        let mut fields = vec![&self.field];
        if let Some(ValueRef::Column(field)) = &self.compare_value {
            fields.push(field);
        }
        fields
    }
}

fn empty_value_for(shape: ValueShape) -> Option<ValueRef> {
    match shape {
        ValueShape::None => None,
        ValueShape::Scalar => Some(ValueRef::literal("")),
        ValueShape::Pair => Some(ValueRef::Literal {
            value: Literal::Range {
                min: Scalar::from(""),
                max: Scalar::from(""),
            },
        }),
        ValueShape::Set => Some(ValueRef::Literal {
            value: Literal::List(Vec::new()),
        }),
    }
}

/// One `WHEN <predicate> THEN <value>` branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhenClause {
    pub predicate: Predicate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine_with: Option<Combinator>,
    #[serde(default)]
    pub additional_predicates: Vec<Predicate>,
    #[serde(default)]
    pub then_return: Option<ValueRef>,
}

impl WhenClause {
    /// A clause with an empty predicate and no return value.
    pub fn empty() -> Self {
        Self::new(Predicate::empty(), None)
    }

    pub fn new(predicate: Predicate, then_return: Option<ValueRef>) -> Self {
        Self {
            predicate,
            combine_with: None,
            additional_predicates: Vec::new(),
            then_return,
        }
    }

    /// Builder: add a predicate combined with `combinator`.
    pub fn with_additional(mut self, combinator: Combinator, predicate: Predicate) -> Self {
        self.combine_with = Some(combinator);
        self.additional_predicates.push(predicate);
        self
    }

    pub fn column_fields(&self) -> Vec<&ColumnField> {
        let mut fields = self.predicate.column_fields();
        for predicate in &self.additional_predicates {
            fields.extend(predicate.column_fields());
        }
        if let Some(ValueRef::Column(field)) = &self.then_return {
            fields.push(field);
        }
        fields
    }
}

/// An ordered list of branches with a mandatory fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionTree {
    #[serde(default)]
    pub when_clauses: Vec<WhenClause>,
    pub else_return: ValueRef,
}

impl ConditionTree {
    pub fn new(else_return: ValueRef) -> Self {
        Self {
            when_clauses: Vec::new(),
            else_return,
        }
    }

    /// A tree for a measure; falls back to `0`.
    pub fn for_measure() -> Self {
        Self::new(ValueRef::literal(0))
    }

    /// A tree for a dimension; falls back to `''`.
    pub fn for_dimension() -> Self {
        Self::new(ValueRef::literal(""))
    }

    /// Builder: append a branch.
    pub fn when(mut self, predicate: Predicate, then_return: ValueRef) -> Self {
        self.when_clauses
            .push(WhenClause::new(predicate, Some(then_return)));
        self
    }

    /// Append an empty branch and return its index.
    pub fn add_when_clause(&mut self) -> usize {
        self.when_clauses.push(WhenClause::empty());
        self.when_clauses.len() - 1
    }

    pub fn remove_when_clause(&mut self, index: usize) -> Option<WhenClause> {
        if index < self.when_clauses.len() {
            Some(self.when_clauses.remove(index))
        } else {
            None
        }
    }

    /// Replace the branch at `index`; returns false if there is none.
    pub fn update_when_clause(&mut self, index: usize, clause: WhenClause) -> bool {
        match self.when_clauses.get_mut(index) {
            Some(slot) => {
                *slot = clause;
                true
            }
            None => false,
        }
    }

    pub fn update_else_return(&mut self, value: ValueRef) {
        self.else_return = value;
    }

    pub fn column_fields(&self) -> Vec<&ColumnField> {
        let mut fields: Vec<&ColumnField> = self
            .when_clauses
            .iter()
            .flat_map(WhenClause::column_fields)
            .collect();
        if let ValueRef::Column(field) = &self.else_return {
            fields.push(field);
        }
        fields
    }
}
