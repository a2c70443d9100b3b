//! Configuration type definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::definition::SortOrder;
use crate::faker::FakerMethod;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection used when no connection name is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_connection: Option<String>,

    /// Named database connections.
    pub connections: BTreeMap<String, ConnectionConfig>,

    /// Declared dump intent.
    #[serde(default)]
    pub dump: DumpConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database type: "mysql" (default) or "postgres".
    #[serde(default = "default_mysql")]
    pub r#type: String,

    /// Database host.
    pub host: String,

    /// Database port (default: 3306 for MySQL, 5432 for PostgreSQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Schema to introspect (PostgreSQL only, default: "public").
    #[serde(default = "default_public_schema")]
    pub schema: String,

    /// Maximum pooled connections (default: 2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<usize>,
}

impl ConnectionConfig {
    /// Effective port, falling back to the database type's default.
    pub fn get_port(&self) -> u16 {
        self.port.unwrap_or_else(|| match self.r#type.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => 5432,
            _ => 3306,
        })
    }

    /// Effective pool size.
    pub fn get_max_connections(&self) -> usize {
        self.max_connections.unwrap_or(2)
    }
}

/// Declared dump intent, applied to a
/// [`DumpSchema`](crate::registry::DumpSchema) by [`DumpConfig::apply`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Include every discovered table with default settings.
    #[serde(default)]
    pub all_tables: bool,

    /// Tables skipped by `all_tables`.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Tables dumped without rows.
    #[serde(default)]
    pub schema_only: Vec<String>,

    /// Per-table customizations, applied in order.
    #[serde(default)]
    pub tables: Vec<TableConfig>,

    /// Seed for synthetic values, for reproducible dumps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faker_seed: Option<u64>,
}

/// Customization for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name (exact, case-sensitive).
    pub name: String,

    /// Dump structure only.
    #[serde(default)]
    pub schema_only: bool,

    /// Column rules keyed by column name.
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnRuleConfig>,

    /// Row ordering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderByConfig>,

    /// Maximum rows to dump.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Row filter (SQL boolean expression).
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Rows per output statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
}

/// Rule for one column. Exactly one field must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnRuleConfig {
    /// Mask every character with this single character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,

    /// Replace with a fixed value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<String>,

    /// Replace with NULL.
    #[serde(default)]
    pub nullify: bool,

    /// Replace with a synthetic value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake: Option<FakerMethod>,
}

impl ColumnRuleConfig {
    /// Number of rule kinds set on this entry.
    pub fn rule_count(&self) -> usize {
        [
            self.mask.is_some(),
            self.replace.is_some(),
            self.nullify,
            self.fake.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderByConfig {
    /// Column to order by.
    pub column: String,

    /// Direction (default: asc).
    #[serde(default)]
    pub order: SortOrder,
}

// Default value functions for serde
fn default_mysql() -> String {
    "mysql".to_string()
}

fn default_public_schema() -> String {
    "public".to_string()
}
