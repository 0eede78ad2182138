//! Shipping Service
//!
//! Composes the rule store, the matcher and the calculator, and implements the
//! admin save and delete flow.

use thiserror::Error;
use tracing::{Span, info, warn};

use crate::{
    calculator::{self, LineItem},
    cart::{Cart, CartError, Customer},
    context::CartContext,
    matcher,
    products::Catalogue,
    rules::{
        ALL_CATEGORIES, RuleId, ShippingRule,
        draft::{RuleDraft, RuleValidationError},
    },
    store::{RuleStore, StoreError},
};

/// Shipping service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The submitted rule is invalid; nothing was stored.
    #[error(transparent)]
    Validation(#[from] RuleValidationError),

    /// No rule has this id.
    #[error("shipping rule {0} not found")]
    NotFound(RuleId),

    /// The rule store failed.
    #[error("shipping rule storage failed")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Percentage shipping over a rule store.
#[derive(Debug, Clone)]
pub struct ShippingService<S> {
    store: S,
}

impl<S: RuleStore> ShippingService<S> {
    /// Wrap a rule store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shipping line items for a cart context.
    ///
    /// Never fails: if the rules cannot be read the failure is logged and no
    /// line items are returned.
    #[tracing::instrument(
        name = "shipping.service.quote",
        skip_all,
        fields(
            customer_country = %ctx.customer_country,
            matched_count = tracing::field::Empty
        )
    )]
    pub fn quote<'a>(&self, ctx: &CartContext<'a>) -> Vec<LineItem<'a>> {
        let rules = match self.store.list_active() {
            Ok(rules) => rules,
            Err(err) => {
                warn!(error = %err, "could not load shipping rules, quoting without them");

                Vec::new()
            }
        };

        let matched = matcher::filter(&rules, ctx);

        Span::current().record("matched_count", matched.len());

        calculator::compute(&matched, &ctx.subtotal)
    }

    /// Extract the context for a cart and quote it.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot be read against the catalogue.
    pub fn quote_cart(
        &self,
        cart: &Cart,
        catalogue: &Catalogue<'_>,
        customer: &Customer,
    ) -> Result<Vec<LineItem<'static>>, CartError> {
        let ctx = CartContext::extract(cart, catalogue, customer)?;

        Ok(self.quote(&ctx))
    }

    /// Validate and store a rule: insert it when `id` is `None`, otherwise
    /// overwrite the existing rule.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`]: the draft is invalid; the store is not touched.
    /// - [`ServiceError::NotFound`]: `id` names no stored rule.
    /// - [`ServiceError::Storage`]: the store failed.
    #[tracing::instrument(
        name = "shipping.service.save_rule",
        skip(self, draft),
        fields(rule_id = tracing::field::Empty),
        err
    )]
    pub fn save_rule(
        &mut self,
        id: Option<RuleId>,
        draft: &RuleDraft,
    ) -> Result<RuleId, ServiceError> {
        let definition = draft.validate()?;

        if definition.uses_all_sentinel() {
            warn!(
                category = ALL_CATEGORIES,
                "rule restricts categories to the literal \"all\" slug, which only matches products in that category"
            );
        }

        let id = match id {
            Some(id) => {
                self.store.update(id, definition)?;
                id
            }
            None => self.store.create(definition)?,
        };

        Span::current().record("rule_id", id.get());

        info!(rule_id = %id, "saved shipping rule");

        Ok(id)
    }

    /// Delete a rule.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown id, or
    /// [`ServiceError::Storage`] if the store failed.
    #[tracing::instrument(name = "shipping.service.delete_rule", skip(self), err)]
    pub fn delete_rule(&mut self, id: RuleId) -> Result<(), ServiceError> {
        self.store.delete(id)?;

        info!(rule_id = %id, "deleted shipping rule");

        Ok(())
    }

    /// Every stored rule, in id order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the rules cannot be read.
    pub fn rules(&self) -> Result<Vec<ShippingRule>, ServiceError> {
        Ok(self.store.list_all()?)
    }

    /// Active rules only, in id order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the rules cannot be read.
    pub fn active_rules(&self) -> Result<Vec<ShippingRule>, ServiceError> {
        Ok(self.store.list_active()?)
    }

    /// One rule by id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown id, or
    /// [`ServiceError::Storage`] if the rules cannot be read.
    pub fn rule(&self, id: RuleId) -> Result<ShippingRule, ServiceError> {
        Ok(self.store.get(id)?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::{
        rules::RuleDefinition,
        store::{MemoryRuleStore, MockRuleStore},
        tags::{collection::TagCollection, string::StringTagCollection},
    };

    use super::*;

    fn draft(title: &str, percentage: Decimal) -> RuleDraft {
        RuleDraft {
            title: title.to_string(),
            percentage: Some(percentage),
            active: true,
            ..RuleDraft::default()
        }
    }

    fn ctx() -> CartContext<'static> {
        CartContext::new(
            "DE",
            StringTagCollection::from_strs(&["books"]),
            StringTagCollection::empty(),
            Money::from_minor(20_000, EUR),
        )
    }

    fn stored(id: u64, definition: RuleDefinition) -> ShippingRule {
        ShippingRule::new(RuleId::new(id), definition)
    }

    #[test]
    fn quote_prices_matching_active_rules() -> TestResult {
        let mut service = ShippingService::new(MemoryRuleStore::new());

        service.save_rule(None, &draft("Standard", Decimal::new(5, 0)))?;
        service.save_rule(
            None,
            &RuleDraft {
                country: "FR".to_string(),
                ..draft("France", Decimal::TWO)
            },
        )?;
        service.save_rule(
            None,
            &RuleDraft {
                active: false,
                ..draft("Disabled", Decimal::TEN)
            },
        )?;

        let line_items = service.quote(&ctx());

        assert_eq!(
            line_items,
            [LineItem {
                label: "Standard".to_string(),
                amount: Money::from_minor(1_000, EUR),
            }]
        );

        Ok(())
    }

    #[test]
    fn quote_falls_back_to_no_rules_when_storage_fails() {
        let mut store = MockRuleStore::new();
        store
            .expect_list_active()
            .times(1)
            .returning(|| Err(StoreError::IdsExhausted));

        let service = ShippingService::new(store);

        assert!(service.quote(&ctx()).is_empty());
    }

    #[test]
    fn invalid_drafts_never_reach_the_store() {
        let mut store = MockRuleStore::new();
        store.expect_create().never();
        store.expect_update().never();

        let mut service = ShippingService::new(store);

        let missing_title = service.save_rule(None, &draft("  ", Decimal::ONE));
        let too_high = service.save_rule(Some(RuleId::new(1)), &draft("Huge", Decimal::new(101, 0)));

        assert!(matches!(
            missing_title,
            Err(ServiceError::Validation(RuleValidationError::MissingTitle))
        ));
        assert!(matches!(
            too_high,
            Err(ServiceError::Validation(RuleValidationError::Percentage(_)))
        ));
    }

    #[test]
    fn save_without_id_creates() -> TestResult {
        let mut store = MockRuleStore::new();
        store
            .expect_create()
            .withf(|rule| rule.title() == "New")
            .times(1)
            .returning(|_| Ok(RuleId::new(4)));
        store.expect_update().never();

        let mut service = ShippingService::new(store);

        assert_eq!(service.save_rule(None, &draft("New", Decimal::ONE))?, RuleId::new(4));

        Ok(())
    }

    #[test]
    fn save_with_id_updates() -> TestResult {
        let mut store = MockRuleStore::new();
        store.expect_create().never();
        store
            .expect_update()
            .withf(|id, rule| *id == RuleId::new(3) && rule.title() == "Edited")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut service = ShippingService::new(store);

        assert_eq!(
            service.save_rule(Some(RuleId::new(3)), &draft("Edited", Decimal::ONE))?,
            RuleId::new(3)
        );

        Ok(())
    }

    #[test]
    fn updating_an_unknown_rule_is_not_found() {
        let mut service = ShippingService::new(MemoryRuleStore::new());

        let result = service.save_rule(Some(RuleId::new(8)), &draft("Ghost", Decimal::ONE));

        assert!(matches!(result, Err(ServiceError::NotFound(id)) if id == RuleId::new(8)));
    }

    #[test]
    fn all_sentinel_is_stored_literally() -> TestResult {
        let mut service = ShippingService::new(MemoryRuleStore::new());

        let id = service.save_rule(
            None,
            &RuleDraft {
                categories: vec![ALL_CATEGORIES.to_string()],
                ..draft("Everything?", Decimal::ONE)
            },
        )?;

        let rule = service.rule(id)?;

        assert!(rule.uses_all_sentinel());
        assert!(rule.categories().contains(ALL_CATEGORIES));
        assert!(service.quote(&ctx()).is_empty());

        Ok(())
    }

    #[test]
    fn delete_removes_the_rule() -> TestResult {
        let mut service = ShippingService::new(MemoryRuleStore::new());
        let id = service.save_rule(None, &draft("Short lived", Decimal::ONE))?;

        service.delete_rule(id)?;

        assert!(service.rules()?.is_empty());
        assert!(matches!(service.delete_rule(id), Err(ServiceError::NotFound(_))));

        Ok(())
    }

    #[test]
    fn storage_errors_are_not_reported_as_not_found() {
        let mut store = MockRuleStore::new();
        store
            .expect_list_all()
            .returning(|| Err(StoreError::IdsExhausted));

        let service = ShippingService::new(store);

        assert!(matches!(
            service.rules(),
            Err(ServiceError::Storage(StoreError::IdsExhausted))
        ));
    }

    #[test]
    fn active_rules_come_from_the_store_in_order() -> TestResult {
        let first = draft("First", Decimal::ONE).validate()?;
        let second = draft("Second", Decimal::TWO).validate()?;

        let mut store = MockRuleStore::new();
        store
            .expect_list_active()
            .returning(move || Ok(vec![stored(1, first.clone()), stored(2, second.clone())]));

        let service = ShippingService::new(store);

        let titles: Vec<String> = service
            .active_rules()?
            .iter()
            .map(|rule| rule.title().to_string())
            .collect();

        assert_eq!(titles, ["First", "Second"]);

        Ok(())
    }
}
