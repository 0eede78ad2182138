//! Quotes for the sample fixture carts.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR},
};
use testresult::TestResult;
use thiserror::Error;

use percent_shipping::{calculator, prelude::*};

#[derive(Debug, Error)]
enum QuoteError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

fn service() -> Result<ShippingService<MemoryRuleStore>, ServiceError> {
    let mut service = ShippingService::new(MemoryRuleStore::new());

    service.save_rule(
        None,
        &RuleDraft {
            title: "Electronics".to_string(),
            categories: vec!["electronics".to_string()],
            percentage: Some(Decimal::new(5, 0)),
            active: true,
            ..RuleDraft::default()
        },
    )?;
    service.save_rule(
        None,
        &RuleDraft {
            title: "France".to_string(),
            country: "FR".to_string(),
            percentage: Some(Decimal::TWO),
            active: true,
            ..RuleDraft::default()
        },
    )?;
    service.save_rule(
        None,
        &RuleDraft {
            title: "Variable products".to_string(),
            product_types: vec!["variable".to_string()],
            percentage: Some(Decimal::new(15, 1)),
            active: true,
            ..RuleDraft::default()
        },
    )?;

    Ok(service)
}

fn quote(cart_name: &str) -> Result<Vec<(String, Money<'static, Currency>)>, QuoteError> {
    let mut fixture = Fixture::with_base_path(FIXTURES);
    fixture.load_products("shop")?;

    let (cart, customer) = fixture.load_cart(cart_name)?;

    Ok(service()?
        .quote_cart(&cart, fixture.catalogue(), &customer)?
        .into_iter()
        .map(|line_item| (line_item.label, line_item.amount))
        .collect())
}

#[test]
fn german_electronics_cart() -> TestResult {
    assert_eq!(
        quote("germany")?,
        [("Electronics".to_string(), Money::from_minor(1_000, EUR))]
    );

    Ok(())
}

#[test]
fn french_books_and_clothing_cart() -> TestResult {
    // Subtotal 55.00: 2% is 1.10, 1.5% is 0.825 rounded half-up to 0.83.
    assert_eq!(
        quote("france")?,
        [
            ("France".to_string(), Money::from_minor(110, EUR)),
            ("Variable products".to_string(), Money::from_minor(83, EUR)),
        ]
    );

    Ok(())
}

#[test]
fn guest_cart_with_no_categories_or_country() -> TestResult {
    assert!(quote("guest")?.is_empty());

    Ok(())
}

#[test]
fn shipping_total_sums_line_items() -> TestResult {
    let line_items = [
        LineItem {
            label: "France".to_string(),
            amount: Money::from_minor(110, EUR),
        },
        LineItem {
            label: "Variable products".to_string(),
            amount: Money::from_minor(83, EUR),
        },
    ];

    assert_eq!(calculator::total(&line_items, EUR)?, Money::from_minor(193, EUR));

    Ok(())
}
