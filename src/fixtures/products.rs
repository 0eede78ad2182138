//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, JPY, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, products::Product, tags::string::StringTagCollection};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Category slugs
    #[serde(default)]
    pub categories: Vec<String>,

    /// Declared product type (e.g. "simple")
    #[serde(default, rename = "type")]
    pub product_type: Option<String>,

    /// Unit price (e.g. "12.50 EUR")
    pub price: String,
}

impl TryFrom<ProductFixture> for Product<'static> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product {
            name: fixture.name,
            categories: fixture.categories.into_iter().collect::<StringTagCollection>(),
            product_type: fixture.product_type,
            price: Money::from_minor(minor_units, currency),
        })
    }
}

/// Look up a supported currency by its ISO code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for any other code.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        "JPY" => Ok(JPY),
        "USD" => Ok(USD),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a price string (e.g. "2.99 GBP") into minor units and currency.
///
/// The amount is scaled by the currency's exponent, so "500 JPY" is 500 minor
/// units and "5.00 EUR" is 500 too. Negative amounts, and amounts finer than
/// the minor unit, are rejected rather than rounded.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if
/// the amount is not a decimal number representable in minor units, or if the
/// currency code is not recognised.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let currency = parse_currency(currency_code)?;

    let scaled = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|factor| amount.checked_mul(Decimal::from(factor)))
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    if !scaled.fract().is_zero() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = scaled
        .to_i64()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
