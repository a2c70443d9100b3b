//! Per-table dump definitions.
//!
//! A [`TableDefinition`] always wraps a table that discovery reported. It is
//! created in its default state (full dump, no column rules, every row) and
//! then shaped by caller-supplied customizations through the mutators below.

mod column;

pub use column::{ColumnDefinition, ColumnRule, ValueGenerator};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::schema::{ColumnSchema, TableSchema};
use crate::faker::{Faker, FakerMethod};

/// Default mask character.
pub const DEFAULT_MASK: char = 'x';

/// What part of a table is dumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpMode {
    /// Structure and rows.
    #[default]
    Full,
    /// Structure only.
    SchemaOnly,
}

/// Sort direction for row ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub order: SortOrder,
}

/// Which rows are dumped, and in what order.
///
/// The filter is an opaque SQL boolean expression handed to the writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSelection {
    pub order_by: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub filter: Option<String>,
}

impl RowSelection {
    /// Check if every row is selected in natural order.
    pub fn is_unrestricted(&self) -> bool {
        self.order_by.is_empty() && self.limit.is_none() && self.filter.is_none()
    }
}

/// Mutable dump intent for one discovered table.
#[derive(Debug, Clone)]
pub struct TableDefinition {
    schema: TableSchema,
    mode: DumpMode,
    columns: Vec<ColumnDefinition>,
    selection: RowSelection,
    chunk_size: Option<usize>,
}

impl TableDefinition {
    /// Create a full-dump definition with no column rules.
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            mode: DumpMode::Full,
            columns: Vec::new(),
            selection: RowSelection::default(),
            chunk_size: None,
        }
    }

    // ===== Dump mode =====

    /// Dump structure only. Idempotent.
    pub fn schema_only(&mut self) -> &mut Self {
        self.mode = DumpMode::SchemaOnly;
        self
    }

    /// Dump structure and rows (the default).
    pub fn full_dump(&mut self) -> &mut Self {
        self.mode = DumpMode::Full;
        self
    }

    // ===== Column rules =====

    /// Mask a column with [`DEFAULT_MASK`].
    pub fn mask(&mut self, column: impl Into<String>) -> &mut Self {
        self.mask_with(column, DEFAULT_MASK)
    }

    /// Mask a column with a specific character.
    pub fn mask_with(&mut self, column: impl Into<String>, mask: char) -> &mut Self {
        self.set_rule(column.into(), ColumnRule::Mask(mask))
    }

    /// Replace a column with a fixed value (`None` for NULL).
    pub fn replace(&mut self, column: impl Into<String>, value: Option<String>) -> &mut Self {
        self.set_rule(column.into(), ColumnRule::Replace(value))
    }

    /// Replace a column with the output of a generator.
    pub fn replace_with<F>(&mut self, column: impl Into<String>, generator: F) -> &mut Self
    where
        F: Fn(&mut Faker, Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        self.set_rule(column.into(), ColumnRule::Generate(Arc::new(generator)))
    }

    /// Replace a column with a named synthetic value.
    pub fn fake(&mut self, column: impl Into<String>, method: FakerMethod) -> &mut Self {
        self.set_rule(column.into(), ColumnRule::Fake(method))
    }

    /// Drop the rule for a column, if any.
    pub fn clear_rule(&mut self, column: &str) -> &mut Self {
        self.columns.retain(|c| c.column != column);
        self
    }

    fn set_rule(&mut self, column: String, rule: ColumnRule) -> &mut Self {
        if !self.schema.has_column(&column) {
            warn!(
                "Table {}: rule {} targets unknown column '{}'",
                self.schema.name,
                rule.describe(),
                column
            );
        }
        match self.columns.iter_mut().find(|c| c.column == column) {
            Some(existing) => existing.rule = rule,
            None => self.columns.push(ColumnDefinition { column, rule }),
        }
        self
    }

    // ===== Row selection =====

    /// Append an ORDER BY term.
    pub fn order_by(&mut self, column: impl Into<String>, order: SortOrder) -> &mut Self {
        self.selection.order_by.push(OrderBy {
            column: column.into(),
            order,
        });
        self
    }

    /// Dump at most `limit` rows.
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.selection.limit = Some(limit);
        self
    }

    /// Only dump rows matching a SQL boolean expression.
    pub fn filter(&mut self, expression: impl Into<String>) -> &mut Self {
        self.selection.filter = Some(expression.into());
        self
    }

    /// Emit rows in statements of at most `size` rows. Zero is treated as one.
    pub fn output_in_chunks_of(&mut self, size: usize) -> &mut Self {
        self.chunk_size = Some(size.max(1));
        self
    }

    // ===== Accessors =====

    /// Table name.
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// The discovered table this definition wraps.
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Columns in discovery order.
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.schema.columns
    }

    pub fn mode(&self) -> DumpMode {
        self.mode
    }

    pub fn is_schema_only(&self) -> bool {
        self.mode == DumpMode::SchemaOnly
    }

    /// Whether the writer should export rows.
    pub fn should_dump_data(&self) -> bool {
        self.mode == DumpMode::Full
    }

    /// Rule for a column, if one was set.
    pub fn find_rule(&self, column: &str) -> Option<&ColumnRule> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| &c.rule)
    }

    /// All column rules in the order they were first set.
    pub fn rules(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    pub fn chunk_size(&self) -> Option<usize> {
        self.chunk_size
    }

    /// Rewrite one value of `column`; columns without a rule pass through.
    pub fn apply(&self, column: &str, value: Option<&str>, faker: &mut Faker) -> Option<String> {
        match self.find_rule(column) {
            Some(rule) => rule.apply(value, faker),
            None => value.map(str::to_string),
        }
    }
}
