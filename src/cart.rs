//! Cart

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Catalogue, ProductKey};

/// Errors raised while reading a cart against its catalogue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A cart line references a product missing from the catalogue (line index).
    #[error("cart line {0} references a product that is not in the catalogue")]
    UnknownProduct(usize),

    /// A product's currency differs from the cart currency (line index, product currency, cart currency).
    #[error("cart line {0} is priced in {1}, but the cart is in {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// The subtotal does not fit in minor units.
    #[error("cart subtotal overflowed")]
    Overflow,
}

/// One line of a cart: a product and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    /// Product in the catalogue
    pub product: ProductKey,

    /// Units of the product
    pub quantity: u32,
}

/// A cart in a single currency.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart with the given lines.
    pub fn with_lines(lines: impl Into<Vec<CartLine>>, currency: &'static Currency) -> Self {
        Self {
            lines: lines.into(),
            currency,
        }
    }

    /// Add a line to the cart.
    pub fn push(&mut self, product: ProductKey, quantity: u32) {
        self.lines.push(CartLine { product, quantity });
    }

    /// The cart lines, in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Sum of unit price times quantity over every line, before shipping and tax.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnknownProduct`]: a line references a missing product.
    /// - [`CartError::CurrencyMismatch`]: a product is priced in another currency.
    /// - [`CartError::Overflow`]: the total does not fit in minor units.
    pub fn subtotal(&self, catalogue: &Catalogue<'_>) -> Result<Money<'static, Currency>, CartError> {
        let minor = self
            .lines
            .iter()
            .enumerate()
            .try_fold(0_i64, |acc, (i, line)| {
                let product = catalogue
                    .get(line.product)
                    .ok_or(CartError::UnknownProduct(i))?;

                let product_currency = product.price.currency();
                if product_currency != self.currency {
                    return Err(CartError::CurrencyMismatch(
                        i,
                        product_currency.iso_alpha_code,
                        self.currency.iso_alpha_code,
                    ));
                }

                product
                    .price
                    .to_minor_units()
                    .checked_mul(i64::from(line.quantity))
                    .and_then(|line_total| acc.checked_add(line_total))
                    .ok_or(CartError::Overflow)
            })?;

        Ok(Money::from_minor(minor, self.currency))
    }
}

/// The customer a cart belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Customer {
    /// Billing country code; empty when unknown.
    #[serde(default, rename = "country")]
    pub billing_country: String,
}

impl Customer {
    /// Create a customer billed to the given country.
    pub fn new(billing_country: impl Into<String>) -> Self {
        Self {
            billing_country: billing_country.into(),
        }
    }
}
