//! Heuristic join discovery between the base table and referenced tables.
//!
//! The heuristic is name based and approximate: singularization is naive by
//! default, and `id` substring checks can pick an unrelated column when a
//! table pair shares several `*id*` columns. Proposed joins are a starting
//! point for the user, not a guaranteed-correct join graph.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use metric_schema::inference::JoinInferenceEngine;
//! use metric_schema::metadata::{TableCatalog, TableSchema};
//!
//! let catalog = TableCatalog::new(vec![
//!     TableSchema::new("orders").column("customer_id", "INT"),
//!     TableSchema::new("customers").column("id", "INT"),
//! ]);
//! let used: BTreeSet<String> = ["orders", "customers"].iter().map(|t| t.to_string()).collect();
//!
//! let report = JoinInferenceEngine::default().infer("orders", &used, &catalog, &[]);
//! assert_eq!(report.inferred[0].conditions[0].left_column, "customer_id");
//! ```

mod engine;
pub mod inflection;
pub mod naming;

pub use engine::{InferenceConfig, InferenceReport, JoinInferenceEngine};
pub use inflection::Singularization;
pub use naming::{best_match, column_sides, ColumnMatcher, CommonColumn, MatchKind};
