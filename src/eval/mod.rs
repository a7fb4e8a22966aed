//! Reference evaluator for condition trees.
//!
//! Condition trees are compiled and executed server-side; this evaluator
//! implements the same semantics over in-memory rows so schemas can be
//! previewed and tested without a database.
//!
//! - branches are tried in order and the first match wins
//! - with no match the `else_return` value is returned
//! - a branch with additional predicates matches when the primary predicate
//!   and all additional predicates hold (AND), or when any of them holds (OR);
//!   a missing combinator means AND
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use metric_schema::model::{ColumnField, ComparisonOperator, ConditionTree, Predicate, ValueRef};
//!
//! let tree = ConditionTree::for_dimension().when(
//!     Predicate::new(ColumnField::new("amount"), ComparisonOperator::Gt, Some(ValueRef::literal(100))).unwrap(),
//!     ValueRef::literal("large"),
//! );
//!
//! let row: HashMap<String, serde_json::Value> = [("amount".to_string(), serde_json::json!(250))].into();
//! assert_eq!(tree.evaluate(&row).unwrap(), serde_json::json!("large"));
//! ```

mod compare;
mod transform;

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::Value;

pub use compare::{compare, equals, like};
pub use transform::{apply_pipeline, apply_transform};

use crate::error::EvalError;
use crate::model::{
    ColumnField, Combinator, ComparisonOperator, ConditionTree, Literal, Predicate, ValueRef,
    WhenClause,
};

/// A source of column values.
pub trait Row {
    /// Raw value of `table.column` (before transforms). Missing values are NULL.
    fn value(&self, table: Option<&str>, column: &str) -> Option<Value>;
}

fn lookup<'a>(
    get: impl Fn(&str) -> Option<&'a Value>,
    table: Option<&str>,
    column: &str,
) -> Option<Value> {
    table
        .and_then(|t| get(&format!("{}.{}", t, column)))
        .or_else(|| get(column))
        .cloned()
}

/// Keys are `"table.column"` or bare `"column"`; qualified keys win.
impl<S: BuildHasher> Row for HashMap<String, Value, S> {
    fn value(&self, table: Option<&str>, column: &str) -> Option<Value> {
        lookup(|k| self.get(k), table, column)
    }
}

impl Row for BTreeMap<String, Value> {
    fn value(&self, table: Option<&str>, column: &str) -> Option<Value> {
        lookup(|k| self.get(k), table, column)
    }
}

/// Read a column from `row` and run its transform pipeline.
pub fn resolve_field(field: &ColumnField, row: &dyn Row) -> Result<Value, EvalError> {
    let raw = row
        .value(field.table_name(), &field.column)
        .unwrap_or(Value::Null);
    apply_pipeline(&field.transforms, raw)
}

/// Resolve a value reference to a concrete value.
///
/// Lists and ranges resolve to JSON arrays.
pub fn resolve(value: &ValueRef, row: &dyn Row) -> Result<Value, EvalError> {
    match value {
        ValueRef::Column(field) => resolve_field(field, row),
        ValueRef::Literal { value } => Ok(match value {
            Literal::Scalar(s) => s.to_json(),
            Literal::List(items) => Value::Array(items.iter().map(|s| s.to_json()).collect()),
            Literal::Range { min, max } => Value::Array(vec![min.to_json(), max.to_json()]),
        }),
    }
}

impl Predicate {
    /// Evaluate against a row.
    pub fn evaluate(&self, row: &dyn Row) -> Result<bool, EvalError> {
        if !self.field.is_selected() {
            return Err(incomplete(&self.field, "no column selected"));
        }

        let left = resolve_field(&self.field, row)?;

        let right = if self.operator.takes_value() {
            let compare_value = self
                .compare_value
                .as_ref()
                .ok_or_else(|| incomplete(&self.field, "compare value is missing"))?;
            if left.is_null() {
                return Ok(false);
            }
            resolve(compare_value, row)?
        } else {
            Value::Null
        };

        let result = match self.operator {
            ComparisonOperator::IsNull => left.is_null(),
            ComparisonOperator::IsNotNull => !left.is_null(),
            ComparisonOperator::Eq => equals(&left, &right),
            ComparisonOperator::NotEq => compare(&left, &right).is_some_and(|o| o.is_ne()),
            ComparisonOperator::Gt => compare(&left, &right).is_some_and(|o| o.is_gt()),
            ComparisonOperator::Lt => compare(&left, &right).is_some_and(|o| o.is_lt()),
            ComparisonOperator::GtEq => compare(&left, &right).is_some_and(|o| o.is_ge()),
            ComparisonOperator::LtEq => compare(&left, &right).is_some_and(|o| o.is_le()),
            ComparisonOperator::Like => match (left.as_str(), right.as_str()) {
                (Some(text), Some(pattern)) => like(text, pattern),
                _ => false,
            },
            ComparisonOperator::In => members(&right).iter().any(|v| equals(&left, v)),
            ComparisonOperator::NotIn => !members(&right).iter().any(|v| equals(&left, v)),
            ComparisonOperator::Between => match right.as_array().map(Vec::as_slice) {
                Some([min, max]) => {
                    compare(&left, min).is_some_and(|o| o.is_ge())
                        && compare(&left, max).is_some_and(|o| o.is_le())
                }
                _ => return Err(incomplete(&self.field, "BETWEEN needs a [min, max] pair")),
            },
        };

        Ok(result)
    }
}

fn members(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

fn incomplete(field: &ColumnField, message: &str) -> EvalError {
    EvalError::IncompletePredicate {
        column: field.to_string(),
        message: message.to_string(),
    }
}

impl WhenClause {
    /// Whether this branch matches `row`.
    pub fn matches(&self, row: &dyn Row) -> Result<bool, EvalError> {
        let primary = self.predicate.evaluate(row)?;
        if self.additional_predicates.is_empty() {
            return Ok(primary);
        }

        match self.combine_with.unwrap_or(Combinator::And) {
            Combinator::And => {
                if !primary {
                    return Ok(false);
                }
                for predicate in &self.additional_predicates {
                    if !predicate.evaluate(row)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Combinator::Or => {
                if primary {
                    return Ok(true);
                }
                for predicate in &self.additional_predicates {
                    if predicate.evaluate(row)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

impl ConditionTree {
    /// Index of the first matching branch, or `None` for the fallback.
    pub fn matching_branch(&self, row: &dyn Row) -> Result<Option<usize>, EvalError> {
        for (index, clause) in self.when_clauses.iter().enumerate() {
            if clause.matches(row)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Evaluate the tree: first matching branch's value, else the fallback.
    pub fn evaluate(&self, row: &dyn Row) -> Result<Value, EvalError> {
        match self.matching_branch(row)? {
            Some(index) => {
                let value = self.when_clauses[index]
                    .then_return
                    .as_ref()
                    .ok_or(EvalError::MissingReturn(index))?;
                resolve(value, row)
            }
            None => resolve(&self.else_return, row),
        }
    }
}
