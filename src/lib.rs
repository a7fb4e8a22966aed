//! # metric_schema
//!
//! Semantic metric schema model with automatic join inference.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Table metadata (external provider)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [column picks]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Model: ColumnField, ValueRef, ConditionTree, members   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [SchemaUpdate]
//! ┌─────────────────────────────────────────────────────────┐
//! │     MetricSchema aggregate  ◄──  MetricEditor session    │
//! │     used tables ──► JoinInferenceEngine ──► joins        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [serde_json]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Serialized schema for the SQL compiler          │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod eval;
pub mod inference;
pub mod metadata;
pub mod model;
pub mod schema;

pub use error::{Collection, EvalError, SchemaError, SchemaResult};
pub use schema::{MetricEditor, MetricSchema, SchemaUpdate};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::error::{SchemaError, SchemaResult};
    pub use crate::eval::Row;
    pub use crate::inference::{InferenceConfig, JoinInferenceEngine, Singularization};
    pub use crate::metadata::{ColumnSchema, TableCatalog, TableSchema, TableSchemaProvider};
    pub use crate::model::{
        CachePolicy, ColumnField, CombinePart, Combinator, ComparisonOperator, ConditionTree,
        JoinCondition, JoinEdge, JoinType, Literal, MemberSource, NullsOrder, OrderSequence,
        OrderType, OutputFormat, Predicate, RefreshPolicy, Scalar, SchemaMember, Transform,
        TransformFunction, ValueKind, ValueRef, WhenClause,
    };
    pub use crate::schema::{MetricEditor, MetricSchema, SchemaUpdate};
}
