//! Discovered schema metadata: tables, columns and their logical types.
//!
//! These types are produced by [`SchemaDiscoverer`](crate::discovery::SchemaDiscoverer)
//! and are read-only for everything downstream of discovery.

use serde::{Deserialize, Serialize};

/// Portable column type, independent of the database's native type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalType {
    /// Short character data (char, varchar).
    String,
    /// 32-bit integer.
    Integer,
    /// Unbounded character data. Also the fallback for unknown types.
    Text,
    /// Calendar date.
    Date,
    /// Date and time.
    #[serde(rename = "datetime")]
    DateTime,
    /// 64-bit integer.
    #[serde(rename = "bigint")]
    BigInt,
    /// 16-bit integer.
    #[serde(rename = "smallint")]
    SmallInt,
    /// Raw bytes.
    Binary,
    /// JSON document.
    Json,
    /// Exact numeric.
    Decimal,
}

impl LogicalType {
    /// Name used in plan summaries and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::String => "string",
            LogicalType::Integer => "integer",
            LogicalType::Text => "text",
            LogicalType::Date => "date",
            LogicalType::DateTime => "datetime",
            LogicalType::BigInt => "bigint",
            LogicalType::SmallInt => "smallint",
            LogicalType::Binary => "binary",
            LogicalType::Json => "json",
            LogicalType::Decimal => "decimal",
        }
    }

    /// Whether values of this type are numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LogicalType::Integer | LogicalType::BigInt | LogicalType::SmallInt | LogicalType::Decimal
        )
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name, unique within its table.
    pub name: String,

    /// Portable type the native type was mapped to.
    pub logical_type: LogicalType,

    /// Native type name exactly as the connection reported it.
    pub native_type: String,
}

/// Table metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name as reported by the connection.
    pub name: String,

    /// Columns in discovery order.
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Create a table with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Find a column by exact name.
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check if the table has a column with this exact name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in discovery order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
