//! Core traits for database-agnostic schema introspection.
//!
//! - [`SchemaIntrospector`]: lists tables and columns on one connection
//!
//! Drivers under `drivers/` implement the trait; tests implement it with
//! in-memory stubs.

use async_trait::async_trait;

use crate::error::Result;

/// A column as reported by the connection, before type mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    /// Column name.
    pub name: String,
    /// Native type name (e.g., "varchar", "int4").
    pub type_name: String,
}

impl RawColumn {
    /// Create a raw column.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Read-only schema introspection against a single database connection.
///
/// Implementations must not retry or swallow failures; errors surface to the
/// caller of discovery unchanged.
#[async_trait]
pub trait SchemaIntrospector: Send + Sync {
    /// List base table names, in the order the connection reports them.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// List the columns of one table, in ordinal order.
    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>>;

    /// Get the database type identifier (e.g., "mysql", "postgres").
    fn db_type(&self) -> &str;

    /// Close any pooled connections.
    async fn close(&self) {}
}
