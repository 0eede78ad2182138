//! Rule Matching
//!
//! Selects the rules that apply to a cart. Every predicate must pass; an empty
//! rule constraint is unrestricted.

use crate::{context::CartContext, rules::ShippingRule, tags::collection::TagCollection};

/// Filter `rules` down to the active rules that apply to `ctx`, keeping their order.
pub fn filter<'r>(rules: &'r [ShippingRule], ctx: &CartContext<'_>) -> Vec<&'r ShippingRule> {
    rules.iter().filter(|rule| matches(rule, ctx)).collect()
}

/// Whether a single rule applies to `ctx`.
pub fn matches(rule: &ShippingRule, ctx: &CartContext<'_>) -> bool {
    rule.is_active()
        && country_matches(rule, ctx)
        && categories_match(rule, ctx)
        && product_types_match(rule, ctx)
}

/// Exact, case-sensitive country comparison; an empty rule country matches anyone.
fn country_matches(rule: &ShippingRule, ctx: &CartContext<'_>) -> bool {
    rule.country().is_empty() || rule.country() == ctx.customer_country
}

fn categories_match(rule: &ShippingRule, ctx: &CartContext<'_>) -> bool {
    rule.categories().admits(&ctx.categories)
}

fn product_types_match(rule: &ShippingRule, ctx: &CartContext<'_>) -> bool {
    rule.product_types().admits(&ctx.product_types)
}
