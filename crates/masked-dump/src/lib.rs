//! # masked-dump
//!
//! Dump plan engine for masked database exports.
//!
//! This library turns a declared dump intent into a resolved, ordered plan
//! that a dump writer consumes:
//!
//! - **Schema discovery** against MySQL or PostgreSQL, cached per registry
//! - **Type mapping** from native column types to a small logical set
//! - **Table customization** with schema-only mode, column masking,
//!   replacement, synthetic values, and row selection
//! - **YAML configuration** for connections and dump intent
//!
//! ## Example
//!
//! ```rust,no_run
//! use masked_dump::{Config, ConnectionCatalog, ConnectionName, DumpSchema, FakerMethod};
//!
//! #[tokio::main]
//! async fn main() -> masked_dump::Result<()> {
//!     let config = Config::load("dump.yaml")?;
//!     let catalog = ConnectionCatalog::from_config(&config);
//!     let connection = ConnectionName::default_connection();
//!     let introspector = catalog.open(&connection).await?;
//!
//!     let mut schema = DumpSchema::new(connection, introspector);
//!     schema
//!         .all_tables()
//!         .schema_only("sessions")
//!         .table("users", |table, _faker| {
//!             table.mask("password").fake("email", FakerMethod::SafeEmail);
//!         });
//!
//!     let plan = schema.resolve().await?;
//!     for table in &plan {
//!         println!("{} dump data: {}", table.name(), table.should_dump_data());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod definition;
pub mod discovery;
pub mod drivers;
pub mod error;
pub mod faker;
pub mod registry;
pub mod typemap;

// Re-exports for convenient access
pub use crate::core::{
    ColumnSchema, ConnectionCatalog, ConnectionName, LogicalType, RawColumn, SchemaIntrospector,
    TableSchema,
};
pub use config::{Config, ConnectionConfig, DumpConfig, TableConfig};
pub use definition::{ColumnRule, DumpMode, SortOrder, TableDefinition};
pub use discovery::SchemaDiscoverer;
pub use drivers::IntrospectorImpl;
pub use error::{DumpError, Result};
pub use faker::{Faker, FakerMethod};
pub use registry::{DumpPlan, DumpSchema, PlanSummary};
pub use typemap::map_type;
