//! Join inference engine.
//!
//! Proposes left joins from the base table to every other used table (a star,
//! never a chain) by matching column names. Pairs already covered by a join,
//! whether user-authored or previously inferred, are skipped, so re-running
//! the engine on the same state proposes nothing new.

use std::collections::{BTreeSet, HashSet};

use super::inflection::Singularization;
use super::naming::{best_match, column_sides, ColumnMatcher};
use crate::config::InferenceSettings;
use crate::metadata::TableSchemaProvider;
use crate::model::{pair_key, JoinCondition, JoinEdge, JoinType};

/// Configuration for the inference engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceConfig {
    /// Whether inference runs at all.
    pub disabled: bool,
    /// How table names are singularized for `<table>_id` matching.
    pub singularization: Singularization,
    /// Rank `id` / `<table>_id` matches before same-name matches.
    pub prefer_key_pattern: bool,
}

impl InferenceConfig {
    /// Builder: set singularization strategy.
    pub fn with_singularization(mut self, singularization: Singularization) -> Self {
        self.singularization = singularization;
        self
    }

    /// Builder: enable/disable key-pattern preference.
    pub fn with_key_pattern_preference(mut self, enabled: bool) -> Self {
        self.prefer_key_pattern = enabled;
        self
    }

    /// Builder: enable/disable inference.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.disabled = !enabled;
        self
    }
}

impl From<&InferenceSettings> for InferenceConfig {
    fn from(settings: &InferenceSettings) -> Self {
        Self {
            disabled: !settings.enabled,
            singularization: settings.singularization,
            prefer_key_pattern: settings.prefer_key_pattern,
        }
    }
}

/// Outcome of one inference run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceReport {
    /// Newly proposed edges, to be appended to the schema's joins.
    pub inferred: Vec<JoinEdge>,
    /// Tables with no common column to the base table.
    pub unmatched: Vec<String>,
    /// Tables skipped because a join for the pair already exists.
    pub covered: Vec<String>,
    /// Tables the provider does not know about.
    pub unknown: Vec<String>,
}

impl InferenceReport {
    pub fn is_empty(&self) -> bool {
        self.inferred.is_empty()
    }
}

/// The join inference engine.
#[derive(Debug, Clone, Default)]
pub struct JoinInferenceEngine {
    config: InferenceConfig,
    matcher: ColumnMatcher,
}

impl JoinInferenceEngine {
    pub fn with_config(config: InferenceConfig) -> Self {
        let matcher = ColumnMatcher::new(config.singularization);
        Self { config, matcher }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Propose joins for `used_tables` given the joins that already exist.
    pub fn infer(
        &self,
        base_table: &str,
        used_tables: &BTreeSet<String>,
        provider: &dyn TableSchemaProvider,
        existing: &[JoinEdge],
    ) -> InferenceReport {
        let mut report = InferenceReport::default();

        if self.config.disabled || used_tables.len() < 2 {
            return report;
        }

        let Some(base) = provider.table(base_table) else {
            log::debug!("base table '{}' not in catalog, skipping join inference", base_table);
            report.unknown.push(base_table.to_string());
            return report;
        };

        let mut covered: HashSet<String> = existing.iter().map(JoinEdge::pair_key).collect();

        for table in used_tables.iter().filter(|t| t.as_str() != base_table) {
            let key = pair_key(base_table, table);
            if covered.contains(&key) {
                report.covered.push(table.clone());
                continue;
            }

            let Some(other) = provider.table(table) else {
                log::debug!("table '{}' not in catalog, leaving unjoined", table);
                report.unknown.push(table.clone());
                continue;
            };

            let common = self.matcher.common_columns(base, other);
            let Some(chosen) = best_match(&common, self.config.prefer_key_pattern) else {
                log::debug!(
                    "no common columns between '{}' and '{}', leaving unjoined",
                    base_table,
                    table
                );
                report.unmatched.push(table.clone());
                continue;
            };

            let (left_column, right_column) = column_sides(chosen, base, other);

            log::info!(
                "inferred join {}.{} = {}.{}",
                base_table,
                left_column,
                table,
                right_column
            );

            report.inferred.push(JoinEdge {
                name: format!("{}_{}_join", base_table, table),
                join_type: JoinType::Left,
                left_table: base_table.to_string(),
                right_table: table.clone(),
                conditions: vec![JoinCondition::eq(left_column, right_column)],
                autogenerated: true,
            });
            covered.insert(key);
        }

        report
    }
}
