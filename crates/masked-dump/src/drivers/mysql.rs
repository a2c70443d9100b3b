//! MySQL/MariaDB schema introspection.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::{debug, info};

use super::POOL_CONNECTION_TIMEOUT;
use crate::config::ConnectionConfig;
use crate::core::traits::{RawColumn, SchemaIntrospector};
use crate::error::{DumpError, Result};

/// MySQL/MariaDB introspector backed by a small sqlx pool.
pub struct MysqlIntrospector {
    pool: MySqlPool,
    database: String,
}

impl MysqlIntrospector {
    /// Create a new MySQL introspector from configuration.
    pub async fn new(config: &ConnectionConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.get_port())
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.get_max_connections() as u32)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DumpError::pool(e, "creating MySQL pool"))?;

        info!(
            "Connected to MySQL: {}:{}/{}",
            config.host,
            config.get_port(),
            config.database
        );

        Ok(Self {
            pool,
            database: config.database.clone(),
        })
    }
}

#[async_trait]
impl SchemaIntrospector for MysqlIntrospector {
    async fn list_tables(&self) -> Result<Vec<String>> {
        // CAST to CHAR: some servers report information_schema names as VARBINARY
        let query = r#"
            SELECT CAST(TABLE_NAME AS CHAR(255)) AS TABLE_NAME
            FROM INFORMATION_SCHEMA.TABLES
            WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
        "#;

        let rows: Vec<MySqlRow> = sqlx::query(query)
            .bind(&self.database)
            .fetch_all(&self.pool)
            .await?;

        let tables = rows
            .iter()
            .map(|row| row.try_get::<String, _>("TABLE_NAME"))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} tables in '{}'", tables.len(), self.database);
        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        let query = r#"
            SELECT
                CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
                CAST(DATA_TYPE AS CHAR(255)) AS DATA_TYPE
            FROM INFORMATION_SCHEMA.COLUMNS
            WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;

        let rows: Vec<MySqlRow> = sqlx::query(query)
            .bind(&self.database)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(RawColumn {
                name: row.try_get::<String, _>("COLUMN_NAME")?,
                type_name: row.try_get::<String, _>("DATA_TYPE")?,
            });
        }

        Ok(columns)
    }

    fn db_type(&self) -> &str {
        "mysql"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
