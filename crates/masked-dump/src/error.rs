//! Error types for schema discovery and plan resolution.

use thiserror::Error;

/// Main error type for dump-plan operations.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Configuration error (invalid YAML, missing fields, unknown connection, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Introspection failed for a reason reported outside of a driver error.
    #[error("Introspection failed on connection '{connection}': {message}")]
    Introspection { connection: String, message: String },

    /// MySQL introspection error
    #[cfg(feature = "mysql")]
    #[error("MySQL error: {0}")]
    Mysql(#[from] sqlx::Error),

    /// PostgreSQL introspection error
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Connection pool error with context
    #[error("Pool error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// A customization names a table the connection does not have
    #[error("Invalid table name {0}")]
    UnknownTable(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exit code for configuration errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for introspection and pool failures.
pub const EXIT_INTROSPECTION_ERROR: u8 = 2;
/// Exit code for references to tables that do not exist.
pub const EXIT_UNKNOWN_TABLE: u8 = 3;
/// Exit code for IO errors.
pub const EXIT_IO_ERROR: u8 = 7;

impl DumpError {
    /// Create a Pool error with context about where it occurred
    pub fn pool(message: impl std::fmt::Display, context: impl Into<String>) -> Self {
        DumpError::Pool {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create an Introspection error for a connection
    pub fn introspection(connection: impl Into<String>, message: impl Into<String>) -> Self {
        DumpError::Introspection {
            connection: connection.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from talking to the database.
    pub fn is_introspection_failure(&self) -> bool {
        match self {
            DumpError::Introspection { .. } | DumpError::Pool { .. } => true,
            #[cfg(feature = "mysql")]
            DumpError::Mysql(_) => true,
            #[cfg(feature = "postgres")]
            DumpError::Postgres(_) => true,
            _ => false,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DumpError::Config(_) | DumpError::Yaml(_) | DumpError::Json(_) => EXIT_CONFIG_ERROR,
            DumpError::UnknownTable(_) => EXIT_UNKNOWN_TABLE,
            DumpError::Io(_) => EXIT_IO_ERROR,
            _ => EXIT_INTROSPECTION_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for dump-plan operations.
pub type Result<T> = std::result::Result<T, DumpError>;
