//! Dimensions and measures.

use serde::{Deserialize, Serialize};

use super::column::ColumnField;
use super::condition::ConditionTree;

/// One piece of a concatenated source, followed by its delimiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinePart {
    pub field: ColumnField,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    " ".to_string()
}

impl CombinePart {
    pub fn new(field: ColumnField, delimiter: impl Into<String>) -> Self {
        Self {
            field,
            delimiter: delimiter.into(),
        }
    }
}

/// Where a member's value comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MemberSource {
    /// A single column.
    Column(ColumnField),
    /// Delimiter-joined concatenation of several columns.
    Combine { parts: Vec<CombinePart> },
    /// A `WHEN ... THEN ... ELSE` expression.
    Condition(ConditionTree),
}

impl MemberSource {
    pub fn column_fields(&self) -> Vec<&ColumnField> {
        match self {
            MemberSource::Column(field) => vec![field],
            MemberSource::Combine { parts } => parts.iter().map(|p| &p.field).collect(),
            MemberSource::Condition(tree) => tree.column_fields(),
        }
    }
}

/// Display formatting applied to a member's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputFormat {
    Number { decimals: u8 },
    Currency { code: String, decimals: u8 },
    Percent { decimals: u8 },
    Date { pattern: String },
    Prefix { value: String },
    Suffix { value: String },
}

/// A named dimension or measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: MemberSource,
    #[serde(default)]
    pub formatting: Vec<OutputFormat>,
}

impl SchemaMember {
    pub fn new(name: impl Into<String>, source: MemberSource) -> Self {
        Self {
            name: name.into(),
            description: None,
            source,
            formatting: Vec::new(),
        }
    }

    /// A member backed by `field`, named after the picked column.
    pub fn from_column(field: ColumnField) -> Self {
        Self::new(field.column.clone(), MemberSource::Column(field))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.formatting.push(format);
        self
    }

    pub fn column_fields(&self) -> Vec<&ColumnField> {
        self.source.column_fields()
    }
}
