//! Value references: a static literal or a column field.
//!
//! Values serialize as an explicitly tagged union:
//!
//! ```text
//! {"kind":"column","table":"orders","column":"amount","transforms":[]}
//! {"kind":"literal","value":42}
//! ```
//!
//! The deserializer also accepts untagged payloads, where any object carrying
//! a `column` key is a column field and everything else is a literal.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::column::ColumnField;

/// A single literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
            Scalar::Int(i) => serde_json::Value::from(*i),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Scalar::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("NULL"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Int(i64::from(i))
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// A static literal: a scalar, a list (IN / NOT IN) or a range (BETWEEN).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Range { min: Scalar, max: Scalar },
}

impl Literal {
    /// Interpret this literal as a BETWEEN range.
    ///
    /// A two-element list is accepted as `[min, max]`.
    pub fn as_range(&self) -> Option<(&Scalar, &Scalar)> {
        match self {
            Literal::Range { min, max } => Some((min, max)),
            Literal::List(items) if items.len() == 2 => Some((&items[0], &items[1])),
            _ => None,
        }
    }
}

macro_rules! literal_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::Scalar(value.into())
                }
            }
        )*
    };
}

literal_from_scalar!(&str, String, i64, i32, f64, bool);

impl From<Scalar> for Literal {
    fn from(value: Scalar) -> Self {
        Literal::Scalar(value)
    }
}

/// Which side of the union a value is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Static,
    Column,
}

/// A comparator or branch result: a literal or a column field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValueRef {
    Column(ColumnField),
    Literal { value: Literal },
}

impl ValueRef {
    pub fn literal(value: impl Into<Literal>) -> Self {
        ValueRef::Literal {
            value: value.into(),
        }
    }

    pub fn column(field: ColumnField) -> Self {
        ValueRef::Column(field)
    }

    /// A fresh, empty value of the given kind.
    pub fn fresh(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Static => ValueRef::literal(""),
            ValueKind::Column => ValueRef::Column(ColumnField::empty()),
        }
    }

    /// Switch to `kind`, discarding the current contents.
    ///
    /// The previous value is never coerced into the new kind.
    pub fn switch_kind(&self, kind: ValueKind) -> Self {
        Self::fresh(kind)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ValueRef::Column(_) => ValueKind::Column,
            ValueRef::Literal { .. } => ValueKind::Static,
        }
    }

    pub fn is_column_field(&self) -> bool {
        matches!(self, ValueRef::Column(_))
    }

    pub fn as_column_field(&self) -> Option<&ColumnField> {
        match self {
            ValueRef::Column(field) => Some(field),
            ValueRef::Literal { .. } => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            ValueRef::Column(_) => None,
            ValueRef::Literal { value } => Some(value),
        }
    }
}

impl From<ColumnField> for ValueRef {
    fn from(field: ColumnField) -> Self {
        ValueRef::Column(field)
    }
}

impl<'de> Deserialize<'de> for ValueRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        value_ref_from_json(raw).map_err(de::Error::custom)
    }
}

fn value_ref_from_json(raw: serde_json::Value) -> Result<ValueRef, serde_json::Error> {
    if let serde_json::Value::Object(map) = &raw {
        match map.get("kind").and_then(|k| k.as_str()) {
            Some("column") => return serde_json::from_value(raw).map(ValueRef::Column),
            Some("literal") => {
                let value = map.get("value").cloned().unwrap_or(serde_json::Value::Null);
                return serde_json::from_value(value).map(|value| ValueRef::Literal { value });
            }
            _ => {}
        }
        if map.contains_key("column") {
            return serde_json::from_value(raw).map(ValueRef::Column);
        }
    }
    serde_json::from_value(raw).map(|value| ValueRef::Literal { value })
}
