//! PostgreSQL schema introspection.
//!
//! Column types are reported as `udt_name` (`int4`, `varchar`, `timestamptz`)
//! which the type map knows alongside the MySQL spellings.

use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::Config as PgConfig;
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::core::traits::{RawColumn, SchemaIntrospector};
use crate::error::{DumpError, Result};

/// PostgreSQL introspector backed by a deadpool pool.
pub struct PostgresIntrospector {
    pool: Pool,
    schema: String,
}

impl PostgresIntrospector {
    /// Create a new PostgreSQL introspector from configuration.
    pub async fn new(config: &ConnectionConfig) -> Result<Self> {
        let mut pg_config = PgConfig::new();
        pg_config.host(&config.host);
        pg_config.port(config.get_port());
        pg_config.dbname(&config.database);
        pg_config.user(&config.user);
        pg_config.password(&config.password);
        pg_config.connect_timeout(super::POOL_CONNECTION_TIMEOUT);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        warn!("PostgreSQL introspection connects without TLS; use a trusted network.");
        let mgr = Manager::from_config(pg_config, tokio_postgres::NoTls, mgr_config);
        let pool = Pool::builder(mgr)
            .max_size(config.get_max_connections())
            .build()
            .map_err(|e| DumpError::pool(e, "creating PostgreSQL pool"))?;

        // Test connection
        let client = pool
            .get()
            .await
            .map_err(|e| DumpError::pool(e, "testing PostgreSQL connection"))?;
        client.simple_query("SELECT 1").await?;

        info!(
            "Connected to PostgreSQL: {}:{}/{} (schema '{}')",
            config.host,
            config.get_port(),
            config.database,
            config.schema
        );

        Ok(Self {
            pool,
            schema: config.schema.clone(),
        })
    }
}

#[async_trait]
impl SchemaIntrospector for PostgresIntrospector {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DumpError::pool(e, "getting connection for list_tables"))?;

        let query = r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_type = 'BASE TABLE'
              AND table_schema = $1
            ORDER BY table_name
        "#;

        let rows = client.query(query, &[&self.schema]).await?;
        let tables = rows
            .iter()
            .map(|row| row.try_get::<_, String>(0))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} tables in schema '{}'", tables.len(), self.schema);
        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DumpError::pool(e, "getting connection for list_columns"))?;

        let query = r#"
            SELECT column_name::text, udt_name::text
            FROM information_schema.columns
            WHERE table_schema = $1 AND table_name = $2
            ORDER BY ordinal_position
        "#;

        let rows = client.query(query, &[&self.schema, &table]).await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(RawColumn {
                name: row.try_get::<_, String>(0)?,
                type_name: row.try_get::<_, String>(1)?,
            });
        }

        Ok(columns)
    }

    fn db_type(&self) -> &str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close();
    }
}
