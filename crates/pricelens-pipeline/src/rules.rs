//! Per-field normalization rules.
//!
//! The original item loaders dispatched processors by string key with a
//! framework default; here the same override semantics are an explicit
//! mapping from field name to a [`FieldRule`] variant plus a declared
//! default.

use std::collections::HashMap;

use pricelens_core::fields;

/// Normalization policy for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// First collected value wins.
    TakeFirst,
    /// First collected value wins, then title-cased.
    TakeFirstTitleCase,
    /// Keep the full ordered sequence unchanged.
    Identity,
}

/// Field name → rule mapping with a declared default for unlisted fields.
#[derive(Debug, Clone)]
pub struct RuleTable {
    default: FieldRule,
    overrides: HashMap<String, FieldRule>,
}

impl RuleTable {
    #[must_use]
    pub fn new(default: FieldRule) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, field: &str, rule: FieldRule) -> Self {
        self.overrides.insert(field.to_owned(), rule);
        self
    }

    /// The rule for a field, falling back to the table default.
    #[must_use]
    pub fn rule(&self, field: &str) -> FieldRule {
        self.overrides.get(field).copied().unwrap_or(self.default)
    }

    /// Stock table for product listings: `name` and `brand` are title-cased,
    /// collected reviews stay multi-valued, everything else takes the first
    /// extracted value.
    #[must_use]
    pub fn product_listing() -> Self {
        Self::new(FieldRule::TakeFirst)
            .with_rule(fields::NAME, FieldRule::TakeFirstTitleCase)
            .with_rule(fields::BRAND, FieldRule::TakeFirstTitleCase)
            .with_rule(fields::REVIEWS, FieldRule::Identity)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(FieldRule::TakeFirst)
    }
}
