//! Configuration loading, validation, and translation into declared intent.

mod types;
mod validation;

pub use types::*;

use crate::core::traits::SchemaIntrospector;
use crate::definition::TableDefinition;
use crate::error::Result;
use crate::registry::DumpSchema;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl DumpConfig {
    /// Register this intent on a dump schema.
    ///
    /// `schema_only` entries are registered before `tables`, so a table that
    /// appears in both ends up with the `tables` customization.
    pub fn apply<I: SchemaIntrospector>(&self, schema: &mut DumpSchema<I>) {
        if self.all_tables {
            schema.all_tables();
        }
        for name in &self.exclude {
            schema.exclude(name.clone());
        }
        if let Some(seed) = self.faker_seed {
            schema.with_faker_seed(seed);
        }
        for name in &self.schema_only {
            schema.schema_only(name.clone());
        }
        for table in &self.tables {
            let table = table.clone();
            let name = table.name.clone();
            schema.table(name, move |definition, _faker| table.apply_to(definition));
        }
    }
}

impl TableConfig {
    /// Apply this customization to a table definition.
    pub fn apply_to(&self, definition: &mut TableDefinition) {
        if self.schema_only {
            definition.schema_only();
        }
        for (column, rule) in &self.columns {
            if let Some(ref mask) = rule.mask {
                let mask_char = mask.chars().next().unwrap_or('x');
                definition.mask_with(column.clone(), mask_char);
            } else if let Some(ref value) = rule.replace {
                definition.replace(column.clone(), Some(value.clone()));
            } else if rule.nullify {
                definition.replace(column.clone(), None);
            } else if let Some(method) = rule.fake {
                definition.fake(column.clone(), method);
            }
        }
        for term in &self.order_by {
            definition.order_by(term.column.clone(), term.order);
        }
        if let Some(limit) = self.limit {
            definition.limit(limit);
        }
        if let Some(ref filter) = self.filter {
            definition.filter(filter.clone());
        }
        if let Some(chunk_size) = self.chunk_size {
            definition.output_in_chunks_of(chunk_size);
        }
    }
}
