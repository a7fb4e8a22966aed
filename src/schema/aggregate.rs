//! The metric schema aggregate.
//!
//! `MetricSchema` owns the base table, members, joins, filters, ordering and
//! policies. Fields are private: every write goes through [`SchemaUpdate`]
//! commands reduced by [`MetricSchema::apply`], which validates the result
//! before committing it. A rejected command leaves the schema unchanged.
//!
//! Invariants:
//! - dimension and measure names are non-empty and unique per collection
//! - at most one join per unordered table pair; a user-authored join replaces
//!   an autogenerated join for the same pair

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::cache::{compute_hash, CacheKey};
use crate::error::{Collection, SchemaError, SchemaResult};
use crate::model::{
    CachePolicy, ColumnField, JoinEdge, OrderSequence, Predicate, RefreshPolicy, SchemaMember,
    SemanticType,
};

/// A single write to the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaUpdate {
    BaseTable(String),
    RefreshPolicy(RefreshPolicy),
    CachePolicy(CachePolicy),

    /// Whole-collection replacements.
    Dimensions(Vec<SchemaMember>),
    Measures(Vec<SchemaMember>),
    Joins(Vec<JoinEdge>),
    Filters(Vec<Predicate>),
    Order(Vec<OrderSequence>),

    AddDimension(SchemaMember),
    RemoveDimension(usize),
    UpdateDimension(usize, SchemaMember),

    AddMeasure(SchemaMember),
    RemoveMeasure(usize),
    UpdateMeasure(usize, SchemaMember),

    AddFilter(Predicate),
    RemoveFilter(usize),
    UpdateFilter(usize, Predicate),

    AddOrder(OrderSequence),
    RemoveOrder(usize),
    UpdateOrder(usize, OrderSequence),

    AddJoin(JoinEdge),
    RemoveJoin(usize),
    UpdateJoin(usize, JoinEdge),
}

impl SchemaUpdate {
    /// Whether this update can change the set of used tables.
    pub fn affects_used_tables(&self) -> bool {
        !matches!(
            self,
            SchemaUpdate::RefreshPolicy(_)
                | SchemaUpdate::CachePolicy(_)
                | SchemaUpdate::Joins(_)
                | SchemaUpdate::AddJoin(_)
                | SchemaUpdate::RemoveJoin(_)
                | SchemaUpdate::UpdateJoin(..)
                | SchemaUpdate::Order(_)
                | SchemaUpdate::AddOrder(_)
                | SchemaUpdate::RemoveOrder(_)
                | SchemaUpdate::UpdateOrder(..)
        )
    }
}

/// Serialized form; converted through validation on deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricSchemaDef {
    base_table: String,
    #[serde(default)]
    dimensions: Vec<SchemaMember>,
    #[serde(default)]
    measures: Vec<SchemaMember>,
    #[serde(default)]
    joins: Vec<JoinEdge>,
    #[serde(default)]
    filters: Vec<Predicate>,
    #[serde(default)]
    order: Vec<OrderSequence>,
    #[serde(default)]
    refresh_policy: RefreshPolicy,
    #[serde(default)]
    cache_policy: CachePolicy,
}

/// The root of a metric definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MetricSchemaDef")]
pub struct MetricSchema {
    base_table: String,
    dimensions: Vec<SchemaMember>,
    measures: Vec<SchemaMember>,
    joins: Vec<JoinEdge>,
    filters: Vec<Predicate>,
    order: Vec<OrderSequence>,
    refresh_policy: RefreshPolicy,
    cache_policy: CachePolicy,
}

impl TryFrom<MetricSchemaDef> for MetricSchema {
    type Error = SchemaError;

    fn try_from(def: MetricSchemaDef) -> Result<Self, Self::Error> {
        check_members(Collection::Dimensions, &def.dimensions)?;
        check_members(Collection::Measures, &def.measures)?;
        Ok(Self {
            base_table: def.base_table,
            dimensions: def.dimensions,
            measures: def.measures,
            joins: normalize_joins(def.joins)?,
            filters: def.filters,
            order: def.order,
            refresh_policy: def.refresh_policy,
            cache_policy: def.cache_policy,
        })
    }
}

impl MetricSchema {
    /// An empty schema over `base_table`.
    pub fn new(base_table: impl Into<String>) -> Self {
        Self {
            base_table: base_table.into(),
            dimensions: Vec::new(),
            measures: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            refresh_policy: RefreshPolicy::default(),
            cache_policy: CachePolicy::default(),
        }
    }

    /// Builder: set the cache policy, e.g. from configured defaults.
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    pub fn base_table(&self) -> &str {
        &self.base_table
    }

    pub fn dimensions(&self) -> &[SchemaMember] {
        &self.dimensions
    }

    pub fn measures(&self) -> &[SchemaMember] {
        &self.measures
    }

    pub fn joins(&self) -> &[JoinEdge] {
        &self.joins
    }

    pub fn filters(&self) -> &[Predicate] {
        &self.filters
    }

    pub fn order(&self) -> &[OrderSequence] {
        &self.order
    }

    pub fn refresh_policy(&self) -> &RefreshPolicy {
        &self.refresh_policy
    }

    pub fn cache_policy(&self) -> &CachePolicy {
        &self.cache_policy
    }

    pub fn dimension(&self, name: &str) -> Option<&SchemaMember> {
        self.dimensions.iter().find(|m| m.name == name)
    }

    pub fn measure(&self, name: &str) -> Option<&SchemaMember> {
        self.measures.iter().find(|m| m.name == name)
    }

    /// Apply one update, validating the result before committing it.
    pub fn apply(&mut self, update: SchemaUpdate) -> SchemaResult<()> {
        match update {
            SchemaUpdate::BaseTable(table) => self.base_table = table,
            SchemaUpdate::RefreshPolicy(policy) => self.refresh_policy = policy,
            SchemaUpdate::CachePolicy(policy) => self.cache_policy = policy,

            SchemaUpdate::Dimensions(members) => {
                check_members(Collection::Dimensions, &members)?;
                self.dimensions = members;
            }
            SchemaUpdate::Measures(members) => {
                check_members(Collection::Measures, &members)?;
                self.measures = members;
            }
            SchemaUpdate::Joins(joins) => self.joins = normalize_joins(joins)?,
            SchemaUpdate::Filters(filters) => self.filters = filters,
            SchemaUpdate::Order(order) => self.order = order,

            SchemaUpdate::AddDimension(member) => {
                let next = added(&self.dimensions, member);
                check_members(Collection::Dimensions, &next)?;
                self.dimensions = next;
            }
            SchemaUpdate::RemoveDimension(index) => {
                self.dimensions = removed(Collection::Dimensions, &self.dimensions, index)?;
            }
            SchemaUpdate::UpdateDimension(index, member) => {
                let next = updated(Collection::Dimensions, &self.dimensions, index, member)?;
                check_members(Collection::Dimensions, &next)?;
                self.dimensions = next;
            }

            SchemaUpdate::AddMeasure(member) => {
                let next = added(&self.measures, member);
                check_members(Collection::Measures, &next)?;
                self.measures = next;
            }
            SchemaUpdate::RemoveMeasure(index) => {
                self.measures = removed(Collection::Measures, &self.measures, index)?;
            }
            SchemaUpdate::UpdateMeasure(index, member) => {
                let next = updated(Collection::Measures, &self.measures, index, member)?;
                check_members(Collection::Measures, &next)?;
                self.measures = next;
            }

            SchemaUpdate::AddFilter(filter) => self.filters = added(&self.filters, filter),
            SchemaUpdate::RemoveFilter(index) => {
                self.filters = removed(Collection::Filters, &self.filters, index)?;
            }
            SchemaUpdate::UpdateFilter(index, filter) => {
                self.filters = updated(Collection::Filters, &self.filters, index, filter)?;
            }

            SchemaUpdate::AddOrder(order) => self.order = added(&self.order, order),
            SchemaUpdate::RemoveOrder(index) => {
                self.order = removed(Collection::Order, &self.order, index)?;
            }
            SchemaUpdate::UpdateOrder(index, order) => {
                self.order = updated(Collection::Order, &self.order, index, order)?;
            }

            SchemaUpdate::AddJoin(edge) => {
                self.joins = normalize_joins(added(&self.joins, edge))?;
            }
            SchemaUpdate::RemoveJoin(index) => {
                self.joins = removed(Collection::Joins, &self.joins, index)?;
            }
            SchemaUpdate::UpdateJoin(index, edge) => {
                let next = updated(Collection::Joins, &self.joins, index, edge)?;
                self.joins = normalize_joins(next)?;
            }
        }
        Ok(())
    }

    /// Append inferred edges. Callers guarantee the pairs are not yet covered.
    pub(crate) fn append_inferred(&mut self, edges: Vec<JoinEdge>) {
        self.joins.extend(edges);
    }

    /// Every table referenced by a measure, dimension or filter, plus the base table.
    ///
    /// Fields without an explicit table resolve to the base table.
    pub fn used_tables(&self) -> BTreeSet<String> {
        let mut tables = BTreeSet::new();
        if !self.base_table.is_empty() {
            tables.insert(self.base_table.clone());
        }
        for field in self.column_fields() {
            if let Some(table) = field.table_name() {
                tables.insert(table.to_string());
            }
        }
        tables
    }

    /// All column fields reachable from measures, dimensions and filters.
    pub fn column_fields(&self) -> Vec<&ColumnField> {
        let members = self
            .measures
            .iter()
            .chain(self.dimensions.iter())
            .flat_map(SchemaMember::column_fields);
        let filters = self.filters.iter().flat_map(Predicate::column_fields);
        members.chain(filters).collect()
    }

    /// A member name derived from `base` that is free in `collection`.
    ///
    /// Returns `base` when unused, otherwise `base_2`, `base_3`, ...
    pub fn unique_member_name(&self, collection: Collection, base: &str) -> String {
        let members = match collection {
            Collection::Measures => &self.measures,
            _ => &self.dimensions,
        };
        let taken: HashSet<&str> = members.iter().map(|m| m.name.as_str()).collect();
        let base = if base.is_empty() { "field" } else { base };
        if !taken.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_else(|| base.to_string())
    }

    /// Order sequences naming a measure or dimension that does not exist.
    pub fn unresolved_order(&self) -> Vec<&OrderSequence> {
        self.order
            .iter()
            .filter(|o| match (o.semantic_type, o.member_name()) {
                (SemanticType::Measure, Some(name)) => self.measure(name).is_none(),
                (SemanticType::Dimension, Some(name)) => self.dimension(name).is_none(),
                _ => false,
            })
            .collect()
    }

    /// SHA256 of the serialized schema.
    pub fn fingerprint(&self) -> SchemaResult<String> {
        Ok(compute_hash(self)?)
    }

    /// Cache key for compiled results, or `None` when caching is disabled.
    pub fn cache_key(&self) -> SchemaResult<Option<CacheKey>> {
        if !self.cache_policy.enabled {
            return Ok(None);
        }
        Ok(Some(CacheKey {
            fingerprint: self.fingerprint()?,
            ttl_seconds: self.cache_policy.ttl_seconds,
        }))
    }

    pub fn to_json(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn added<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(item);
    next
}

fn removed<T: Clone>(collection: Collection, items: &[T], index: usize) -> SchemaResult<Vec<T>> {
    check_index(collection, items.len(), index)?;
    let mut next = items.to_vec();
    next.remove(index);
    Ok(next)
}

fn updated<T: Clone>(collection: Collection, items: &[T], index: usize, item: T) -> SchemaResult<Vec<T>> {
    check_index(collection, items.len(), index)?;
    let mut next = items.to_vec();
    next[index] = item;
    Ok(next)
}

fn check_index(collection: Collection, len: usize, index: usize) -> SchemaResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(SchemaError::IndexOutOfRange {
            collection,
            index,
            len,
        })
    }
}

fn check_members(collection: Collection, members: &[SchemaMember]) -> SchemaResult<()> {
    let mut seen = HashSet::new();
    for (index, member) in members.iter().enumerate() {
        if member.name.trim().is_empty() {
            return Err(SchemaError::EmptyName { collection, index });
        }
        if !seen.insert(member.name.as_str()) {
            return Err(SchemaError::DuplicateName {
                collection,
                name: member.name.clone(),
            });
        }
    }
    Ok(())
}

/// Enforce one join per table pair.
///
/// A user-authored edge replaces an autogenerated edge for the same pair in
/// place; a later autogenerated duplicate is dropped; two user-authored edges
/// for one pair are an error.
fn normalize_joins(joins: Vec<JoinEdge>) -> SchemaResult<Vec<JoinEdge>> {
    let mut kept: Vec<JoinEdge> = Vec::with_capacity(joins.len());
    let mut by_pair: HashMap<String, usize> = HashMap::new();

    for edge in joins {
        let key = edge.pair_key();
        match by_pair.get(&key) {
            None => {
                by_pair.insert(key, kept.len());
                kept.push(edge);
            }
            Some(&i) => match (kept[i].autogenerated, edge.autogenerated) {
                (true, false) => kept[i] = edge,
                (_, true) => {}
                (false, false) => {
                    return Err(SchemaError::DuplicateJoin {
                        left: edge.left_table,
                        right: edge.right_table,
                    })
                }
            },
        }
    }

    Ok(kept)
}
