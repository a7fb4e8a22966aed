//! The metric schema aggregate and its edit session.

mod aggregate;
mod editor;
pub mod join_graph;

pub use aggregate::{MetricSchema, SchemaUpdate};
pub use editor::MetricEditor;
pub use join_graph::JoinGraph;
