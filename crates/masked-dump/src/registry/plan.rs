//! The resolved dump plan handed to the writer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::schema::LogicalType;
use crate::definition::{DumpMode, OrderBy, TableDefinition};

/// Ordered mapping from table name to its resolved definition.
///
/// Inserting a name that is already present replaces its definition in
/// place; new names are appended.
#[derive(Debug, Clone, Default)]
pub struct DumpPlan {
    tables: Vec<TableDefinition>,
    index: HashMap<String, usize>,
}

impl DumpPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the definition for its table name.
    pub fn insert(&mut self, definition: TableDefinition) {
        match self.index.get(definition.name()) {
            Some(&pos) => self.tables[pos] = definition,
            None => {
                self.index
                    .insert(definition.name().to_string(), self.tables.len());
                self.tables.push(definition);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TableDefinition> {
        self.index.get(name).map(|&pos| &self.tables[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Definitions in plan order.
    pub fn iter(&self) -> std::slice::Iter<'_, TableDefinition> {
        self.tables.iter()
    }

    /// Table names in plan order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name()).collect()
    }

    /// Names of tables whose rows are omitted.
    pub fn schema_only_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| t.is_schema_only())
            .map(|t| t.name())
            .collect()
    }

    /// Consume the plan, keeping definition order.
    pub fn into_definitions(self) -> Vec<TableDefinition> {
        self.tables
    }

    /// Serializable view of the plan.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            tables: self.tables.iter().map(TableSummary::from).collect(),
        }
    }
}

impl IntoIterator for DumpPlan {
    type Item = TableDefinition;
    type IntoIter = std::vec::IntoIter<TableDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}

impl<'a> IntoIterator for &'a DumpPlan {
    type Item = &'a TableDefinition;
    type IntoIter = std::slice::Iter<'a, TableDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Serializable description of a [`DumpPlan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub tables: Vec<TableSummary>,
}

/// Serializable description of one [`TableDefinition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    pub mode: DumpMode,
    pub columns: Vec<ColumnSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
}

/// Serializable description of one column and its rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub logical_type: LogicalType,
    pub native_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl From<&TableDefinition> for TableSummary {
    fn from(definition: &TableDefinition) -> Self {
        let selection = definition.selection();
        TableSummary {
            name: definition.name().to_string(),
            mode: definition.mode(),
            columns: definition
                .columns()
                .iter()
                .map(|c| ColumnSummary {
                    name: c.name.clone(),
                    logical_type: c.logical_type,
                    native_type: c.native_type.clone(),
                    rule: definition.find_rule(&c.name).map(|r| r.describe()),
                })
                .collect(),
            order_by: selection.order_by.clone(),
            limit: selection.limit,
            filter: selection.filter.clone(),
            chunk_size: definition.chunk_size(),
        }
    }
}
