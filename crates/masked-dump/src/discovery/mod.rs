//! Schema discovery with a write-once cache.
//!
//! The discoverer introspects its connection on the first call to
//! [`SchemaDiscoverer::discover`] and keeps the result for its lifetime.
//! The cache is an explicit `Option`, so a database with zero tables is a
//! cached result like any other and is never re-queried.

use tracing::{debug, info};

use crate::core::catalog::ConnectionName;
use crate::core::schema::{ColumnSchema, TableSchema};
use crate::core::traits::SchemaIntrospector;
use crate::error::{DumpError, Result};
use crate::typemap;

/// Lazily discovers and caches the tables of one connection.
pub struct SchemaDiscoverer<I> {
    connection: ConnectionName,
    introspector: I,
    tables: Option<Vec<TableSchema>>,
}

impl<I: SchemaIntrospector> SchemaDiscoverer<I> {
    /// Create a discoverer; nothing is queried until [`discover`](Self::discover).
    pub fn new(connection: ConnectionName, introspector: I) -> Self {
        Self {
            connection,
            introspector,
            tables: None,
        }
    }

    /// Connection this discoverer introspects.
    pub fn connection(&self) -> &ConnectionName {
        &self.connection
    }

    pub fn introspector(&self) -> &I {
        &self.introspector
    }

    /// Check if discovery has completed.
    pub fn is_loaded(&self) -> bool {
        self.tables.is_some()
    }

    /// Discovered tables, or an empty slice before discovery.
    pub fn tables(&self) -> &[TableSchema] {
        self.tables.as_deref().unwrap_or(&[])
    }

    /// Discover tables and columns, introspecting at most once.
    ///
    /// A failed introspection leaves the cache empty and returns the error
    /// unchanged.
    pub async fn discover(&mut self) -> Result<&[TableSchema]> {
        if self.tables.is_none() {
            let tables = self.load().await?;
            self.tables = Some(tables);
        }
        Ok(self.tables())
    }

    /// Find a discovered table by exact name.
    pub fn find_table(&self, name: &str) -> Result<&TableSchema> {
        self.tables()
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DumpError::UnknownTable(name.to_string()))
    }

    async fn load(&self) -> Result<Vec<TableSchema>> {
        debug!(
            "Introspecting connection {} ({})",
            self.connection,
            self.introspector.db_type()
        );

        let names = self.introspector.list_tables().await?;
        let mut tables = Vec::with_capacity(names.len());

        for name in names {
            let raw_columns = self.introspector.list_columns(&name).await?;
            let mut table = TableSchema::new(name);

            for raw in raw_columns {
                let logical_type = typemap::map_type(&raw.type_name);
                if typemap::lookup(&raw.type_name).is_none() {
                    debug!(
                        "Table {}: column '{}' has unmapped type '{}', using text",
                        table.name, raw.name, raw.type_name
                    );
                }
                table.columns.push(ColumnSchema {
                    name: raw.name,
                    logical_type,
                    native_type: raw.type_name,
                });
            }

            tables.push(table);
        }

        info!(
            "Discovered {} tables on connection {}",
            tables.len(),
            self.connection
        );
        Ok(tables)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::schema::LogicalType;
    use crate::core::traits::RawColumn;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// In-memory introspector that counts calls.
    #[derive(Clone, Default)]
    pub(crate) struct StubIntrospector {
        pub tables: Vec<(String, Vec<RawColumn>)>,
        pub list_tables_calls: Arc<AtomicUsize>,
        pub list_columns_calls: Arc<AtomicUsize>,
        pub fail_tables: bool,
        pub fail_columns: bool,
    }

    impl StubIntrospector {
        pub fn with_tables(tables: &[(&str, &[(&str, &str)])]) -> Self {
            Self {
                tables: tables
                    .iter()
                    .map(|(name, columns)| {
                        (
                            name.to_string(),
                            columns
                                .iter()
                                .map(|(col, ty)| RawColumn::new(*col, *ty))
                                .collect(),
                        )
                    })
                    .collect(),
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_tables: true,
                ..Default::default()
            }
        }

        /// Lists tables normally but fails every column query.
        pub fn failing_columns(tables: &[(&str, &[(&str, &str)])]) -> Self {
            Self {
                fail_columns: true,
                ..Self::with_tables(tables)
            }
        }

        pub fn table_calls(&self) -> usize {
            self.list_tables_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SchemaIntrospector for StubIntrospector {
        async fn list_tables(&self) -> Result<Vec<String>> {
            self.list_tables_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_tables {
                return Err(DumpError::introspection("stub", "access denied"));
            }
            Ok(self.tables.iter().map(|(name, _)| name.clone()).collect())
        }

        async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>> {
            self.list_columns_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_columns {
                return Err(DumpError::introspection("stub", "columns denied"));
            }
            Ok(self
                .tables
                .iter()
                .find(|(name, _)| name == table)
                .map(|(_, columns)| columns.clone())
                .unwrap_or_default())
        }

        fn db_type(&self) -> &str {
            "stub"
        }
    }

    pub(crate) fn users_and_logs() -> StubIntrospector {
        StubIntrospector::with_tables(&[
            ("users", &[("id", "int"), ("email", "varchar")]),
            ("logs", &[("id", "int"), ("payload", "text")]),
        ])
    }

    #[tokio::test]
    async fn test_discover_maps_column_types() {
        let stub = StubIntrospector::with_tables(&[(
            "events",
            &[
                ("id", "bigint"),
                ("kind", "tinyint"),
                ("at", "timestamp"),
                ("shape", "geometry"),
            ],
        )]);
        let mut discoverer = SchemaDiscoverer::new(ConnectionName::named("main"), stub);

        let tables = discoverer.discover().await.unwrap();
        assert_eq!(tables.len(), 1);
        let types: Vec<LogicalType> = tables[0].columns.iter().map(|c| c.logical_type).collect();
        assert_eq!(
            types,
            vec![
                LogicalType::BigInt,
                LogicalType::SmallInt,
                LogicalType::DateTime,
                LogicalType::Text
            ]
        );
        assert_eq!(tables[0].columns[3].native_type, "geometry");
    }

    #[tokio::test]
    async fn test_discover_introspects_once() {
        let stub = users_and_logs();
        let counter = stub.clone();
        let mut discoverer = SchemaDiscoverer::new(ConnectionName::default(), stub);

        assert!(!discoverer.is_loaded());
        discoverer.discover().await.unwrap();
        discoverer.discover().await.unwrap();

        assert!(discoverer.is_loaded());
        assert_eq!(counter.table_calls(), 1);
        assert_eq!(counter.list_columns_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_database_is_cached() {
        let stub = StubIntrospector::default();
        let counter = stub.clone();
        let mut discoverer = SchemaDiscoverer::new(ConnectionName::default(), stub);

        assert!(discoverer.discover().await.unwrap().is_empty());
        assert!(discoverer.discover().await.unwrap().is_empty());
        assert!(discoverer.is_loaded());
        assert_eq!(counter.table_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_propagates_and_is_not_cached() {
        let stub = StubIntrospector::failing();
        let counter = stub.clone();
        let mut discoverer = SchemaDiscoverer::new(ConnectionName::default(), stub);

        let err = discoverer.discover().await.unwrap_err();
        assert!(matches!(err, DumpError::Introspection { .. }));
        assert!(!discoverer.is_loaded());

        assert!(discoverer.discover().await.is_err());
        assert_eq!(counter.table_calls(), 2);
    }

    #[tokio::test]
    async fn test_column_failure_propagates_and_is_not_cached() {
        let stub = StubIntrospector::failing_columns(&[("users", &[("id", "int")])]);
        let counter = stub.clone();
        let mut discoverer = SchemaDiscoverer::new(ConnectionName::default(), stub);

        let err = discoverer.discover().await.unwrap_err();
        assert!(matches!(
            err,
            DumpError::Introspection { ref message, .. } if message == "columns denied"
        ));
        assert!(!discoverer.is_loaded());
        assert!(discoverer.tables().is_empty());
        assert_eq!(counter.table_calls(), 1);
        assert_eq!(counter.list_columns_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_table_is_exact() {
        let mut discoverer = SchemaDiscoverer::new(ConnectionName::default(), users_and_logs());
        assert!(matches!(
            discoverer.find_table("users"),
            Err(DumpError::UnknownTable(_))
        ));

        discoverer.discover().await.unwrap();
        assert_eq!(discoverer.find_table("users").unwrap().columns.len(), 2);
        assert!(matches!(
            discoverer.find_table("Users"),
            Err(DumpError::UnknownTable(name)) if name == "Users"
        ));
    }
}
