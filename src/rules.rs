//! Shipping Rules
//!
//! A rule charges a percentage of the cart subtotal when the customer's country,
//! the cart's categories and the cart's product types all satisfy it.

use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::{
    rules::{draft::RuleDraft, percentage::RulePercentage},
    tags::{collection::TagCollection, string::StringTagCollection},
};

pub mod draft;
pub mod percentage;

/// Category value the admin form offers as "all categories".
///
/// It is stored and matched as an ordinary slug, so a rule restricted to it only
/// applies to carts holding a product whose category slug is literally `all`.
pub const ALL_CATEGORIES: &str = "all";

/// Rule identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(u64);

impl RuleId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated rule fields, without an identifier.
///
/// Only [`RuleDraft::validate`] builds one, so every instance satisfies the
/// field constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDefinition {
    pub(crate) title: String,
    pub(crate) country: String,
    pub(crate) categories: StringTagCollection,
    pub(crate) product_types: StringTagCollection,
    pub(crate) percentage: RulePercentage,
    pub(crate) active: bool,
}

impl RuleDefinition {
    /// Display title, used as the line item label.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Country code the rule is restricted to; empty for any country.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Category slugs; empty for any category.
    pub fn categories(&self) -> &StringTagCollection {
        &self.categories
    }

    /// Product types; empty for any type.
    pub fn product_types(&self) -> &StringTagCollection {
        &self.product_types
    }

    /// Share of the subtotal charged.
    pub fn percentage(&self) -> RulePercentage {
        self.percentage
    }

    /// Whether the rule takes part in quoting.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the categories include the literal [`ALL_CATEGORIES`] value.
    pub fn uses_all_sentinel(&self) -> bool {
        self.categories.contains(ALL_CATEGORIES)
    }

    /// The unvalidated form of this rule, e.g. to pre-fill an edit form.
    pub fn to_draft(&self) -> RuleDraft {
        RuleDraft {
            title: self.title.clone(),
            country: self.country.clone(),
            categories: self.categories.iter().map(ToString::to_string).collect(),
            product_types: self.product_types.iter().map(ToString::to_string).collect(),
            percentage: Some(self.percentage.points()),
            active: self.active,
        }
    }
}

/// A stored shipping rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRule {
    id: RuleId,
    definition: RuleDefinition,
}

impl ShippingRule {
    /// Attach an identifier to a definition.
    pub fn new(id: RuleId, definition: RuleDefinition) -> Self {
        Self { id, definition }
    }

    /// Rule identifier.
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// The rule's fields.
    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    /// Drop the identifier.
    pub fn into_definition(self) -> RuleDefinition {
        self.definition
    }
}

impl Deref for ShippingRule {
    type Target = RuleDefinition;

    fn deref(&self) -> &Self::Target {
        &self.definition
    }
}
