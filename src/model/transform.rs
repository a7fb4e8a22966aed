//! Transform pipelines applied to column references.
//!
//! A pipeline is an ordered list of named functions with parameter bags.
//! Every editing operation returns a new pipeline; out-of-range indices are
//! no-ops. Parameter shape is a contract between the function and the
//! downstream compiler and is not validated here.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Functions that can be applied to a column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformFunction {
    Lower,
    Upper,
    Concat,
    Trim,
    Substring,
    Coalesce,
    Round,
    Abs,
    Ceil,
    Floor,
    Extract,
    DateTrunc,
    DatePart,
    Cast,
}

impl TransformFunction {
    /// All functions, in declaration order.
    pub const ALL: [TransformFunction; 14] = [
        TransformFunction::Lower,
        TransformFunction::Upper,
        TransformFunction::Concat,
        TransformFunction::Trim,
        TransformFunction::Substring,
        TransformFunction::Coalesce,
        TransformFunction::Round,
        TransformFunction::Abs,
        TransformFunction::Ceil,
        TransformFunction::Floor,
        TransformFunction::Extract,
        TransformFunction::DateTrunc,
        TransformFunction::DatePart,
        TransformFunction::Cast,
    ];

    /// SQL spelling of the function.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformFunction::Lower => "LOWER",
            TransformFunction::Upper => "UPPER",
            TransformFunction::Concat => "CONCAT",
            TransformFunction::Trim => "TRIM",
            TransformFunction::Substring => "SUBSTRING",
            TransformFunction::Coalesce => "COALESCE",
            TransformFunction::Round => "ROUND",
            TransformFunction::Abs => "ABS",
            TransformFunction::Ceil => "CEIL",
            TransformFunction::Floor => "FLOOR",
            TransformFunction::Extract => "EXTRACT",
            TransformFunction::DateTrunc => "DATE_TRUNC",
            TransformFunction::DatePart => "DATE_PART",
            TransformFunction::Cast => "CAST",
        }
    }

    /// Whether the function operates on temporal values.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            TransformFunction::Extract | TransformFunction::DateTrunc | TransformFunction::DatePart
        )
    }
}

impl fmt::Display for TransformFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single function application with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub function: TransformFunction,
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(TransformFunction::Lower)
    }
}

impl Transform {
    /// Create a transform with no parameters.
    pub fn new(function: TransformFunction) -> Self {
        Self {
            function,
            params: BTreeMap::new(),
        }
    }

    /// Builder: add a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter.
    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.params.get(key)
    }
}

/// An ordered sequence of transforms, applied left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformPipeline(Vec<Transform>);

impl TransformPipeline {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Transform> {
        self.0.get(index)
    }

    /// Append a transform.
    pub fn add(&self, transform: Transform) -> Self {
        let mut next = self.0.clone();
        next.push(transform);
        Self(next)
    }

    /// Remove the transform at `index`.
    pub fn remove(&self, index: usize) -> Self {
        let mut next = self.0.clone();
        if index < next.len() {
            next.remove(index);
        }
        Self(next)
    }

    /// Move the transform at `index` by `delta` positions.
    ///
    /// A move whose source or target falls outside `[0, len)` returns an
    /// unchanged copy.
    pub fn move_by(&self, index: usize, delta: isize) -> Self {
        let mut next = self.0.clone();
        let Some(target) = index.checked_add_signed(delta) else {
            return Self(next);
        };
        if index >= next.len() || target >= next.len() || target == index {
            return Self(next);
        }
        let item = next.remove(index);
        next.insert(target, item);
        Self(next)
    }

    /// Replace the transform at `index`.
    pub fn update(&self, index: usize, transform: Transform) -> Self {
        let mut next = self.0.clone();
        if let Some(slot) = next.get_mut(index) {
            *slot = transform;
        }
        Self(next)
    }
}

impl From<Vec<Transform>> for TransformPipeline {
    fn from(transforms: Vec<Transform>) -> Self {
        Self(transforms)
    }
}

impl<'a> IntoIterator for &'a TransformPipeline {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
