//! Database driver implementations.
//!
//! - [`mysql`]: MySQL/MariaDB introspection over `INFORMATION_SCHEMA` (sqlx)
//! - [`postgres`]: PostgreSQL introspection over `information_schema` (deadpool-postgres)
//!
//! Each driver is gated by the Cargo feature of the same name. Dispatch goes
//! through [`IntrospectorImpl`], a plain enum, rather than `Box<dyn _>`.

#[cfg(not(any(feature = "mysql", feature = "postgres")))]
compile_error!("enable at least one of the `mysql` or `postgres` features");

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "mysql")]
pub use mysql::MysqlIntrospector;
#[cfg(feature = "postgres")]
pub use postgres::PostgresIntrospector;

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ConnectionConfig;
use crate::core::catalog::ConnectionCatalog;
use crate::core::traits::{RawColumn, SchemaIntrospector};
use crate::error::{DumpError, Result};

/// Connection pool acquire timeout shared by the drivers.
pub(crate) const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Enum-based static dispatch for introspectors.
pub enum IntrospectorImpl {
    #[cfg(feature = "mysql")]
    Mysql(MysqlIntrospector),
    #[cfg(feature = "postgres")]
    Postgres(PostgresIntrospector),
}

impl IntrospectorImpl {
    /// Connect to the database described by `config`.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        match ConnectionCatalog::normalize_db_type(&config.r#type)? {
            #[cfg(feature = "mysql")]
            "mysql" => Ok(IntrospectorImpl::Mysql(MysqlIntrospector::new(config).await?)),
            #[cfg(feature = "postgres")]
            "postgres" => Ok(IntrospectorImpl::Postgres(
                PostgresIntrospector::new(config).await?,
            )),
            other => Err(DumpError::Config(format!(
                "Database type '{}' is not enabled in this build (enable the '{}' feature)",
                other, other
            ))),
        }
    }
}

#[async_trait]
impl SchemaIntrospector for IntrospectorImpl {
    async fn list_tables(&self) -> Result<Vec<String>> {
        match self {
            #[cfg(feature = "mysql")]
            IntrospectorImpl::Mysql(i) => i.list_tables().await,
            #[cfg(feature = "postgres")]
            IntrospectorImpl::Postgres(i) => i.list_tables().await,
        }
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        match self {
            #[cfg(feature = "mysql")]
            IntrospectorImpl::Mysql(i) => i.list_columns(table).await,
            #[cfg(feature = "postgres")]
            IntrospectorImpl::Postgres(i) => i.list_columns(table).await,
        }
    }

    fn db_type(&self) -> &str {
        match self {
            #[cfg(feature = "mysql")]
            IntrospectorImpl::Mysql(i) => i.db_type(),
            #[cfg(feature = "postgres")]
            IntrospectorImpl::Postgres(i) => i.db_type(),
        }
    }

    async fn close(&self) {
        match self {
            #[cfg(feature = "mysql")]
            IntrospectorImpl::Mysql(i) => i.close().await,
            #[cfg(feature = "postgres")]
            IntrospectorImpl::Postgres(i) => i.close().await,
        }
    }
}
