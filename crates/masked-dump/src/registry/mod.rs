//! Dump registry: declared intent in, resolved [`DumpPlan`] out.
//!
//! # Resolution
//!
//! 1. Discover the connection's tables (once per registry, cached).
//! 2. With [`DumpSchema::all_tables`], seed the plan with a default
//!    definition for every discovered table that is not excluded.
//! 3. For each customization, in registration order, build a fresh
//!    definition from the discovered table, run the customizer on it, and
//!    store it over any default for that name.
//!
//! A customization that names an undiscovered table fails the whole
//! resolution; no partial plan is returned.

mod plan;

pub use plan::{ColumnSummary, DumpPlan, PlanSummary, TableSummary};

use tracing::{debug, info};

use crate::core::catalog::ConnectionName;
use crate::core::schema::TableSchema;
use crate::core::traits::SchemaIntrospector;
use crate::definition::TableDefinition;
use crate::discovery::SchemaDiscoverer;
use crate::error::Result;
use crate::faker::Faker;

/// Caller-supplied customization for one table.
pub type Customizer = Box<dyn Fn(&mut TableDefinition, &mut Faker) + Send + Sync>;

/// Declared dump intent for one connection.
pub struct DumpSchema<I> {
    discoverer: SchemaDiscoverer<I>,
    load_all_tables: bool,
    excluded: Vec<String>,
    customized: Vec<(String, Customizer)>,
    faker_seed: Option<u64>,
}

impl<I: SchemaIntrospector> DumpSchema<I> {
    /// Create a registry for a connection and the introspector serving it.
    pub fn new(connection: ConnectionName, introspector: I) -> Self {
        Self {
            discoverer: SchemaDiscoverer::new(connection, introspector),
            load_all_tables: false,
            excluded: Vec::new(),
            customized: Vec::new(),
            faker_seed: None,
        }
    }

    /// Alias for [`DumpSchema::new`].
    pub fn define(connection: ConnectionName, introspector: I) -> Self {
        Self::new(connection, introspector)
    }

    pub fn connection(&self) -> &ConnectionName {
        self.discoverer.connection()
    }

    pub fn discoverer(&self) -> &SchemaDiscoverer<I> {
        &self.discoverer
    }

    /// Include every discovered table with a default definition.
    pub fn all_tables(&mut self) -> &mut Self {
        self.load_all_tables = true;
        self
    }

    /// Leave a table out of the [`all_tables`](Self::all_tables) default.
    ///
    /// Explicit customizations for the table still apply.
    pub fn exclude(&mut self, table: impl Into<String>) -> &mut Self {
        let table = table.into();
        if !self.excluded.contains(&table) {
            self.excluded.push(table);
        }
        self
    }

    /// Dump a table's structure without rows.
    pub fn schema_only(&mut self, table: impl Into<String>) -> &mut Self {
        self.table(table, |definition, _| {
            definition.schema_only();
        })
    }

    /// Register the customization for a table, replacing any earlier one.
    pub fn table<F>(&mut self, table: impl Into<String>, customizer: F) -> &mut Self
    where
        F: Fn(&mut TableDefinition, &mut Faker) + Send + Sync + 'static,
    {
        let table = table.into();
        let customizer: Customizer = Box::new(customizer);
        match self.customized.iter_mut().find(|(name, _)| *name == table) {
            Some(entry) => {
                debug!("Replacing customization for table {}", table);
                entry.1 = customizer;
            }
            None => self.customized.push((table, customizer)),
        }
        self
    }

    /// Seed the faker handed to customizations.
    pub fn with_faker_seed(&mut self, seed: u64) -> &mut Self {
        self.faker_seed = Some(seed);
        self
    }

    /// Check if [`all_tables`](Self::all_tables) was declared.
    pub fn includes_all_tables(&self) -> bool {
        self.load_all_tables
    }

    /// Names with a registered customization, in registration order.
    pub fn customized_tables(&self) -> Vec<&str> {
        self.customized.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Discovered tables, introspecting on first use.
    pub async fn available_tables(&mut self) -> Result<&[TableSchema]> {
        self.discoverer.discover().await
    }

    /// Resolve declared intent against the discovered schema.
    pub async fn resolve(&mut self) -> Result<DumpPlan> {
        self.discoverer.discover().await?;
        let discoverer = &self.discoverer;

        let mut plan = DumpPlan::new();

        if self.load_all_tables {
            for table in discoverer.tables() {
                if self.excluded.iter().any(|name| *name == table.name) {
                    debug!("Skipping excluded table {}", table.name);
                    continue;
                }
                plan.insert(TableDefinition::new(table.clone()));
            }
        }

        for (index, (name, customizer)) in self.customized.iter().enumerate() {
            let schema = discoverer.find_table(name)?;
            let mut definition = TableDefinition::new(schema.clone());
            let mut faker = match self.faker_seed {
                Some(seed) => Faker::seeded(seed.wrapping_add(index as u64)),
                None => Faker::new(),
            };
            customizer(&mut definition, &mut faker);
            debug!(
                "Customized table {} ({} column rules{})",
                name,
                definition.rules().len(),
                if definition.is_schema_only() { ", schema only" } else { "" }
            );
            plan.insert(definition);
        }

        info!(
            "Resolved dump plan for connection {}: {} tables ({} schema only)",
            discoverer.connection(),
            plan.len(),
            plan.schema_only_tables().len()
        );
        Ok(plan)
    }
}
