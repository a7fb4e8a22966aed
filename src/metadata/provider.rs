//! Table schema lookup.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::types::TableSchema;

/// Source of table metadata for join inference.
///
/// Lookups are synchronous: callers fetch the listing up front and hand the
/// engine an in-memory view of it.
pub trait TableSchemaProvider {
    /// Look up a table by exact name.
    fn table(&self, name: &str) -> Option<&TableSchema>;

    /// All known tables, in provider order.
    fn tables(&self) -> Vec<&TableSchema>;
}

/// An in-memory table listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TableCatalog {
    tables: Vec<TableSchema>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl TableCatalog {
    pub fn new(tables: Vec<TableSchema>) -> Self {
        let mut catalog = Self::default();
        for table in tables {
            catalog.insert(table);
        }
        catalog
    }

    /// Add a table, replacing any table with the same name.
    pub fn insert(&mut self, table: TableSchema) {
        match self.index.get(&table.name) {
            Some(&i) => self.tables[i] = table,
            None => {
                self.index.insert(table.name.clone(), self.tables.len());
                self.tables.push(table);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableSchemaProvider for TableCatalog {
    fn table(&self, name: &str) -> Option<&TableSchema> {
        self.index.get(name).map(|&i| &self.tables[i])
    }

    fn tables(&self) -> Vec<&TableSchema> {
        self.tables.iter().collect()
    }
}

impl FromIterator<TableSchema> for TableCatalog {
    fn from_iter<I: IntoIterator<Item = TableSchema>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for TableCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<TableSchema>::deserialize(deserializer).map(TableCatalog::new)
    }
}
