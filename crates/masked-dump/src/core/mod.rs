//! Core abstractions shared by discovery, definitions and drivers.
//!
//! - [`schema`]: Table and column metadata with portable logical types
//! - [`traits`]: The [`SchemaIntrospector`] seam implemented by drivers
//! - [`catalog`]: Opens introspectors for named connections

pub mod catalog;
pub mod schema;
pub mod traits;

pub use catalog::{ConnectionCatalog, ConnectionName};
pub use schema::{ColumnSchema, LogicalType, TableSchema};
pub use traits::{RawColumn, SchemaIntrospector};
