//! Column-name matching between a base table and a joined table.
//!
//! Two columns match when their names are byte-identical, or when one table's
//! `id` column pairs with the other table's `<singular table name>_id` column.
//! Matching is case-sensitive and purely name based; column types are ignored.

use super::inflection::Singularization;
use crate::metadata::TableSchema;

/// Why two columns were considered joinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Same column name on both tables.
    SameName,
    /// `id` on one table, `<table>_id` on the other.
    KeyPattern,
}

/// A column name shared (directly or by key pattern) by two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonColumn {
    /// The shared name, or the `<table>_id` name for key-pattern matches.
    pub name: String,
    pub kind: MatchKind,
}

/// Column matcher parameterized by the singularization strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnMatcher {
    singularization: Singularization,
}

impl ColumnMatcher {
    pub fn new(singularization: Singularization) -> Self {
        Self { singularization }
    }

    /// `<singular table>_id`.
    pub fn key_column_for(&self, table: &str) -> String {
        format!("{}_id", self.singularization.singularize(table))
    }

    /// All common columns, base columns outer and other columns inner.
    ///
    /// Duplicate names keep their first occurrence.
    pub fn common_columns(&self, base: &TableSchema, other: &TableSchema) -> Vec<CommonColumn> {
        let base_key = self.key_column_for(&base.name);
        let other_key = self.key_column_for(&other.name);
        let mut found: Vec<CommonColumn> = Vec::new();

        for base_col in base.column_names() {
            for other_col in other.column_names() {
                let candidate = if base_col == other_col {
                    Some(CommonColumn {
                        name: base_col.to_string(),
                        kind: MatchKind::SameName,
                    })
                } else if base_col == "id" && other_col == base_key {
                    Some(CommonColumn {
                        name: other_col.to_string(),
                        kind: MatchKind::KeyPattern,
                    })
                } else if other_col == "id" && base_col == other_key {
                    Some(CommonColumn {
                        name: base_col.to_string(),
                        kind: MatchKind::KeyPattern,
                    })
                } else {
                    None
                };

                if let Some(candidate) = candidate {
                    if !found.iter().any(|c| c.name == candidate.name) {
                        found.push(candidate);
                    }
                }
            }
        }

        found
    }
}

/// Decide the join columns for a chosen match.
///
/// Returns `(base_column, other_column)`. Same-name matches join the column to
/// itself; key-pattern matches put `id` on the table that owns it.
pub fn column_sides(
    chosen: &CommonColumn,
    base: &TableSchema,
    other: &TableSchema,
) -> (String, String) {
    let name = chosen.name.clone();
    match chosen.kind {
        MatchKind::SameName => (name.clone(), name),
        MatchKind::KeyPattern if base.has_column(&name) && other.has_column("id") => {
            (name, "id".to_string())
        }
        MatchKind::KeyPattern => ("id".to_string(), name),
    }
}

/// Pick the column to join on.
///
/// The first column whose name contains `id` wins, else the first column.
/// With `prefer_key_pattern`, key-pattern matches are considered before
/// same-name matches.
pub fn best_match(common: &[CommonColumn], prefer_key_pattern: bool) -> Option<&CommonColumn> {
    if prefer_key_pattern {
        if let Some(found) = common.iter().find(|c| c.kind == MatchKind::KeyPattern) {
            return Some(found);
        }
    }
    common
        .iter()
        .find(|c| c.name == "id" || c.name.contains("id"))
        .or_else(|| common.first())
}
