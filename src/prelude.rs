//! Percent Shipping prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::LineItem,
    cart::{Cart, CartError, CartLine, Customer},
    context::CartContext,
    fixtures::{Fixture, FixtureError},
    products::{Catalogue, Product, ProductKey, ProductType},
    rules::{
        ALL_CATEGORIES, RuleDefinition, RuleId, ShippingRule,
        draft::{RuleDraft, RuleValidationError},
        percentage::{PercentageError, RulePercentage},
    },
    service::{ServiceError, ShippingService},
    store::{MemoryRuleStore, RuleStore, StoreError, YamlRuleStore},
    tags::{collection::TagCollection, string::StringTagCollection},
};
