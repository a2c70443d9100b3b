//! Connection catalog for explicit dependency injection.
//!
//! The [`ConnectionCatalog`] resolves a [`ConnectionName`] against the
//! configured connections and opens a schema introspector for it. Nothing is
//! looked up from process-wide state: the registry receives the introspector
//! it is going to use at construction time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, ConnectionConfig};
use crate::drivers::IntrospectorImpl;
use crate::error::{DumpError, Result};

/// Name of the connection used when none is configured explicitly.
pub const DEFAULT_CONNECTION: &str = "default";

/// Identifies which configured connection to introspect.
///
/// `None` selects the catalog's default connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionName(Option<String>);

impl ConnectionName {
    /// The catalog's default connection.
    pub fn default_connection() -> Self {
        Self(None)
    }

    /// A connection selected by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    /// The explicit name, if one was given.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Check if this selects the default connection.
    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<String>> for ConnectionName {
    fn from(name: Option<String>) -> Self {
        Self(name)
    }
}

impl From<&str> for ConnectionName {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl std::fmt::Display for ConnectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(name) => f.write_str(name),
            None => f.write_str("<default>"),
        }
    }
}

/// Registry of configured database connections.
#[derive(Debug, Clone, Default)]
pub struct ConnectionCatalog {
    /// Connections by name.
    connections: BTreeMap<String, ConnectionConfig>,

    /// Explicit default connection name.
    default_connection: Option<String>,
}

impl ConnectionCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding every connection from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            connections: config.connections.clone(),
            default_connection: config.default_connection.clone(),
        }
    }

    /// Register a connection by name.
    pub fn register(&mut self, name: impl Into<String>, config: ConnectionConfig) {
        self.connections.insert(name.into(), config);
    }

    /// Set the connection used for [`ConnectionName::default_connection`].
    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default_connection = Some(name.into());
    }

    /// Check if a connection is registered.
    pub fn has_connection(&self, name: &str) -> bool {
        self.connections.contains_key(name)
    }

    /// Get all registered connection names.
    pub fn connection_names(&self) -> Vec<&str> {
        self.connections.keys().map(String::as_str).collect()
    }

    /// Name the default connection resolves to.
    ///
    /// Resolution order: the explicit default, a connection literally named
    /// `default`, then the only registered connection.
    pub fn default_name(&self) -> Result<&str> {
        if let Some(name) = &self.default_connection {
            return Ok(name.as_str());
        }
        if let Some((name, _)) = self.connections.get_key_value(DEFAULT_CONNECTION) {
            return Ok(name.as_str());
        }
        if self.connections.len() == 1 {
            if let Some(name) = self.connections.keys().next() {
                return Ok(name.as_str());
            }
        }
        Err(DumpError::Config(format!(
            "No default connection: set default_connection (configured: {})",
            self.connection_names().join(", ")
        )))
    }

    /// Resolve a connection name to its registered name and configuration.
    pub fn resolve(&self, name: &ConnectionName) -> Result<(&str, &ConnectionConfig)> {
        let key = match name.as_deref() {
            Some(name) => name,
            None => self.default_name()?,
        };
        self.connections
            .get_key_value(key)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| DumpError::Config(format!("Unknown database connection: {}", key)))
    }

    /// Open a schema introspector for a connection.
    pub async fn open(&self, name: &ConnectionName) -> Result<IntrospectorImpl> {
        let (resolved, config) = self.resolve(name)?;
        debug!("Opening connection '{}' ({})", resolved, config.r#type);
        IntrospectorImpl::connect(config).await
    }

    /// Get the canonical database type string.
    ///
    /// Normalizes various aliases to the canonical form:
    /// - "mysql", "mariadb" → "mysql"
    /// - "postgres", "postgresql", "pg" → "postgres"
    pub fn normalize_db_type(db_type: &str) -> Result<&'static str> {
        match db_type.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok("mysql"),
            "postgres" | "postgresql" | "pg" => Ok("postgres"),
            other => Err(DumpError::Config(format!(
                "Unknown database type: '{}'. Supported types: mysql, postgres",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(db_type: &str) -> ConnectionConfig {
        ConnectionConfig {
            r#type: db_type.to_string(),
            host: "localhost".to_string(),
            port: None,
            database: "app".to_string(),
            user: "root".to_string(),
            password: String::new(),
            schema: "public".to_string(),
            max_connections: None,
        }
    }

    #[test]
    fn test_resolve_named_connection() {
        let mut catalog = ConnectionCatalog::new();
        catalog.register("main", connection("mysql"));
        catalog.register("reporting", connection("postgres"));

        let (name, config) = catalog.resolve(&ConnectionName::named("reporting")).unwrap();
        assert_eq!(name, "reporting");
        assert_eq!(config.r#type, "postgres");

        let err = catalog.resolve(&ConnectionName::named("missing")).unwrap_err();
        assert!(matches!(err, DumpError::Config(_)));
    }

    #[test]
    fn test_default_resolution_order() {
        let mut catalog = ConnectionCatalog::new();
        catalog.register("only", connection("mysql"));
        assert_eq!(catalog.default_name().unwrap(), "only");

        catalog.register("default", connection("postgres"));
        assert_eq!(catalog.default_name().unwrap(), "default");

        catalog.set_default("only");
        assert_eq!(catalog.default_name().unwrap(), "only");
    }

    #[test]
    fn test_ambiguous_default_is_an_error() {
        let mut catalog = ConnectionCatalog::new();
        catalog.register("a", connection("mysql"));
        catalog.register("b", connection("mysql"));
        assert!(catalog.default_name().is_err());
        assert!(catalog.resolve(&ConnectionName::default_connection()).is_err());
    }

    #[test]
    fn test_normalize_db_type() {
        assert_eq!(ConnectionCatalog::normalize_db_type("MariaDB").unwrap(), "mysql");
        assert_eq!(ConnectionCatalog::normalize_db_type("pg").unwrap(), "postgres");
        assert!(ConnectionCatalog::normalize_db_type("oracle").is_err());
    }

    #[test]
    fn test_connection_name_display() {
        assert_eq!(ConnectionName::named("main").to_string(), "main");
        assert_eq!(ConnectionName::default_connection().to_string(), "<default>");
        assert!(ConnectionName::from(None).is_default());
    }
}
