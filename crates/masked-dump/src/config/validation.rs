//! Configuration validation.

use super::Config;
use crate::core::catalog::ConnectionCatalog;
use crate::error::{DumpError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.connections.is_empty() {
        return Err(DumpError::Config(
            "at least one connection is required".into(),
        ));
    }

    for (name, conn) in &config.connections {
        if conn.host.is_empty() {
            return Err(DumpError::Config(format!(
                "connections.{}.host is required",
                name
            )));
        }
        if conn.database.is_empty() {
            return Err(DumpError::Config(format!(
                "connections.{}.database is required",
                name
            )));
        }
        if conn.user.is_empty() {
            return Err(DumpError::Config(format!(
                "connections.{}.user is required",
                name
            )));
        }
        ConnectionCatalog::normalize_db_type(&conn.r#type)?;
        if let Some(0) = conn.max_connections {
            return Err(DumpError::Config(format!(
                "connections.{}.max_connections must be at least 1",
                name
            )));
        }
    }

    if let Some(ref default) = config.default_connection {
        if !config.connections.contains_key(default) {
            return Err(DumpError::Config(format!(
                "default_connection '{}' is not a configured connection",
                default
            )));
        }
    }

    for name in config.dump.exclude.iter().chain(&config.dump.schema_only) {
        if name.is_empty() {
            return Err(DumpError::Config("table names cannot be empty".into()));
        }
    }

    for table in &config.dump.tables {
        if table.name.is_empty() {
            return Err(DumpError::Config(
                "dump.tables[].name is required".into(),
            ));
        }
        if let Some(0) = table.chunk_size {
            return Err(DumpError::Config(format!(
                "dump.tables.{}.chunk_size must be at least 1",
                table.name
            )));
        }
        for (column, rule) in &table.columns {
            if rule.rule_count() != 1 {
                return Err(DumpError::Config(format!(
                    "dump.tables.{}.columns.{} must set exactly one of mask, replace, nullify, fake",
                    table.name, column
                )));
            }
            if let Some(ref mask) = rule.mask {
                if mask.chars().count() != 1 {
                    return Err(DumpError::Config(format!(
                        "dump.tables.{}.columns.{}.mask must be a single character, got '{}'",
                        table.name, column, mask
                    )));
                }
            }
        }
        for term in &table.order_by {
            if term.column.is_empty() {
                return Err(DumpError::Config(format!(
                    "dump.tables.{}.order_by[].column is required",
                    table.name
                )));
            }
        }
    }

    Ok(())
}
