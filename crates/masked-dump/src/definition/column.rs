//! Per-column replacement rules.

use std::sync::Arc;

use crate::faker::{Faker, FakerMethod};

/// Caller-supplied value generator: receives the faker and the original
/// value (`None` for NULL) and returns the replacement (`None` for NULL).
pub type ValueGenerator = Arc<dyn Fn(&mut Faker, Option<&str>) -> Option<String> + Send + Sync>;

/// How one column's values are rewritten before they are written out.
#[derive(Clone)]
pub enum ColumnRule {
    /// Replace every character with the mask character. NULL stays NULL.
    Mask(char),
    /// Replace with a fixed value (`None` writes NULL).
    Replace(Option<String>),
    /// Replace with a named synthetic value. NULL stays NULL.
    Fake(FakerMethod),
    /// Replace with the result of a caller-supplied generator.
    Generate(ValueGenerator),
}

impl ColumnRule {
    /// Rewrite one value.
    pub fn apply(&self, value: Option<&str>, faker: &mut Faker) -> Option<String> {
        match self {
            ColumnRule::Mask(mask) => {
                value.map(|v| std::iter::repeat(*mask).take(v.chars().count()).collect())
            }
            ColumnRule::Replace(replacement) => replacement.clone(),
            ColumnRule::Fake(method) => value.map(|_| faker.generate(*method)),
            ColumnRule::Generate(generator) => generator(faker, value),
        }
    }

    /// Short description for plan summaries.
    pub fn describe(&self) -> String {
        match self {
            ColumnRule::Mask(mask) => format!("mask('{}')", mask),
            ColumnRule::Replace(Some(value)) => format!("replace('{}')", value),
            ColumnRule::Replace(None) => "replace(NULL)".to_string(),
            ColumnRule::Fake(method) => format!("fake({})", method),
            ColumnRule::Generate(_) => "generate(<fn>)".to_string(),
        }
    }
}

impl std::fmt::Debug for ColumnRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRule::Mask(mask) => f.debug_tuple("Mask").field(mask).finish(),
            ColumnRule::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
            ColumnRule::Fake(method) => f.debug_tuple("Fake").field(method).finish(),
            ColumnRule::Generate(_) => f.write_str("Generate(..)"),
        }
    }
}

/// A rule bound to a column name.
#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    /// Column the rule applies to.
    pub column: String,
    /// The rule.
    pub rule: ColumnRule,
}
