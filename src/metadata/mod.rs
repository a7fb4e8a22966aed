//! Table metadata consumed by join inference.
//!
//! Table and column listings come from an external schema provider (a data
//! source introspection endpoint). This module defines the shape of that
//! listing and the lookup trait the inference engine reads it through.
//!
//! # Example
//!
//! ```
//! use metric_schema::metadata::{TableCatalog, TableSchemaProvider};
//!
//! let catalog: TableCatalog = serde_json::from_str(r#"[
//!     {"name": "orders", "columns": [{"name": "customer_id", "type": "INT"}]},
//!     {"name": "customers", "columns": [{"name": "id", "type": "INT"}]}
//! ]"#).unwrap();
//!
//! assert!(catalog.table("orders").is_some());
//! ```

mod provider;
mod types;

pub use provider::{TableCatalog, TableSchemaProvider};
pub use types::{ColumnSchema, TableSchema};
