//! Edit session over a single metric schema.
//!
//! `MetricEditor` is the one writer of a `MetricSchema` during an edit. Every
//! mutating call applies a [`SchemaUpdate`], recomputes the used-tables set,
//! and when that set changed runs join inference synchronously. Joins a user
//! deletes stay deleted until the used tables change again.

use std::collections::BTreeSet;

use super::aggregate::{MetricSchema, SchemaUpdate};
use super::join_graph::JoinGraph;
use crate::error::{Collection, SchemaResult};
use crate::inference::{InferenceReport, JoinInferenceEngine};
use crate::metadata::TableSchemaProvider;
use crate::model::{
    CachePolicy, ColumnField, JoinEdge, OrderSequence, Predicate, RefreshPolicy, SchemaMember,
};

pub struct MetricEditor<P: TableSchemaProvider> {
    schema: MetricSchema,
    provider: P,
    engine: JoinInferenceEngine,
    used_tables: BTreeSet<String>,
    last_report: InferenceReport,
}

impl<P: TableSchemaProvider> MetricEditor<P> {
    /// Start editing `schema`. Inference does not run until the used tables
    /// change or [`reconcile_joins`](Self::reconcile_joins) is called.
    pub fn new(schema: MetricSchema, provider: P, engine: JoinInferenceEngine) -> Self {
        let used_tables = schema.used_tables();
        Self {
            schema,
            provider,
            engine,
            used_tables,
            last_report: InferenceReport::default(),
        }
    }

    pub fn schema(&self) -> &MetricSchema {
        &self.schema
    }

    pub fn into_schema(self) -> MetricSchema {
        self.schema
    }

    /// Used tables as of the last change.
    pub fn used_tables(&self) -> &BTreeSet<String> {
        &self.used_tables
    }

    /// Report from the most recent inference run.
    pub fn last_report(&self) -> &InferenceReport {
        &self.last_report
    }

    /// Apply an update and keep derived state consistent.
    pub fn apply(&mut self, update: SchemaUpdate) -> SchemaResult<()> {
        let affects_tables = update.affects_used_tables();
        self.schema.apply(update)?;
        if affects_tables {
            self.refresh_used_tables();
        }
        Ok(())
    }

    fn refresh_used_tables(&mut self) {
        let used = self.schema.used_tables();
        if used != self.used_tables {
            log::debug!("used tables changed: {:?}", used);
            self.used_tables = used;
            self.reconcile_joins();
        }
    }

    /// Run join inference now and append any proposed edges.
    pub fn reconcile_joins(&mut self) -> &InferenceReport {
        let report = self.engine.infer(
            self.schema.base_table(),
            &self.used_tables,
            &self.provider,
            self.schema.joins(),
        );

        if !report.inferred.is_empty() {
            self.schema.append_inferred(report.inferred.clone());
        }

        for table in self.unjoined_tables() {
            log::warn!(
                "table '{}' is used but has no join path to '{}'",
                table,
                self.schema.base_table()
            );
        }

        self.last_report = report;
        &self.last_report
    }

    /// Used tables with no join path to the base table.
    pub fn unjoined_tables(&self) -> Vec<String> {
        JoinGraph::from_joins(self.schema.joins())
            .unreachable(self.schema.base_table(), &self.used_tables)
    }

    pub fn set_base_table(&mut self, table: impl Into<String>) -> SchemaResult<()> {
        self.apply(SchemaUpdate::BaseTable(table.into()))
    }

    pub fn set_refresh_policy(&mut self, policy: RefreshPolicy) -> SchemaResult<()> {
        self.apply(SchemaUpdate::RefreshPolicy(policy))
    }

    pub fn set_cache_policy(&mut self, policy: CachePolicy) -> SchemaResult<()> {
        self.apply(SchemaUpdate::CachePolicy(policy))
    }

    pub fn update_measures(&mut self, measures: Vec<SchemaMember>) -> SchemaResult<()> {
        self.apply(SchemaUpdate::Measures(measures))
    }

    pub fn update_dimensions(&mut self, dimensions: Vec<SchemaMember>) -> SchemaResult<()> {
        self.apply(SchemaUpdate::Dimensions(dimensions))
    }

    pub fn update_joins(&mut self, joins: Vec<JoinEdge>) -> SchemaResult<()> {
        self.apply(SchemaUpdate::Joins(joins))
    }

    pub fn update_filters(&mut self, filters: Vec<Predicate>) -> SchemaResult<()> {
        self.apply(SchemaUpdate::Filters(filters))
    }

    pub fn update_order(&mut self, order: Vec<OrderSequence>) -> SchemaResult<()> {
        self.apply(SchemaUpdate::Order(order))
    }

    /// Add a measure for a picked column, named after it.
    ///
    /// Returns the name the measure was given.
    pub fn pick_measure(&mut self, field: ColumnField) -> SchemaResult<String> {
        let name = self
            .schema
            .unique_member_name(Collection::Measures, &field.column);
        let member = SchemaMember {
            name: name.clone(),
            ..SchemaMember::from_column(field)
        };
        self.apply(SchemaUpdate::AddMeasure(member))?;
        Ok(name)
    }

    /// Add a dimension for a picked column, named after it.
    pub fn pick_dimension(&mut self, field: ColumnField) -> SchemaResult<String> {
        let name = self
            .schema
            .unique_member_name(Collection::Dimensions, &field.column);
        let member = SchemaMember {
            name: name.clone(),
            ..SchemaMember::from_column(field)
        };
        self.apply(SchemaUpdate::AddDimension(member))?;
        Ok(name)
    }

    pub fn remove_measure(&mut self, index: usize) -> SchemaResult<()> {
        self.apply(SchemaUpdate::RemoveMeasure(index))
    }

    pub fn remove_dimension(&mut self, index: usize) -> SchemaResult<()> {
        self.apply(SchemaUpdate::RemoveDimension(index))
    }

    pub fn add_filter(&mut self, filter: Predicate) -> SchemaResult<()> {
        self.apply(SchemaUpdate::AddFilter(filter))
    }

    pub fn add_join(&mut self, edge: JoinEdge) -> SchemaResult<()> {
        self.apply(SchemaUpdate::AddJoin(edge))
    }
}
