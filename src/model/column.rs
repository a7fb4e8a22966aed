//! Column references.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::transform::{Transform, TransformPipeline};

/// A (table, column) reference with an attached transform pipeline.
///
/// `table` may be omitted while only one table is in scope; an absent or empty
/// table resolves to the schema's base table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub transforms: TransformPipeline,
}

impl ColumnField {
    /// A reference to `column` on the base table.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
            transforms: TransformPipeline::new(),
        }
    }

    /// A reference to `table.column`.
    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
            transforms: TransformPipeline::new(),
        }
    }

    /// An unselected column, as produced when switching a value to column mode.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder: append a transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms = self.transforms.add(transform);
        self
    }

    /// The explicit table name, if any and non-empty.
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref().filter(|t| !t.is_empty())
    }

    /// The table this column resolves to, given the schema's base table.
    pub fn resolved_table<'a>(&'a self, base_table: &'a str) -> &'a str {
        self.table_name().unwrap_or(base_table)
    }

    /// Whether a column has been picked.
    pub fn is_selected(&self) -> bool {
        !self.column.is_empty()
    }

    pub fn add_transform(&self, transform: Transform) -> Self {
        self.with_pipeline(self.transforms.add(transform))
    }

    pub fn remove_transform(&self, index: usize) -> Self {
        self.with_pipeline(self.transforms.remove(index))
    }

    pub fn move_transform(&self, index: usize, delta: isize) -> Self {
        self.with_pipeline(self.transforms.move_by(index, delta))
    }

    pub fn update_transform(&self, index: usize, transform: Transform) -> Self {
        self.with_pipeline(self.transforms.update(index, transform))
    }

    fn with_pipeline(&self, transforms: TransformPipeline) -> Self {
        Self {
            table: self.table.clone(),
            column: self.column.clone(),
            transforms,
        }
    }
}

impl fmt::Display for ColumnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.table_name() {
            Some(table) => write!(f, "{}.{}", table, self.column),
            None => f.write_str(&self.column),
        }
    }
}
