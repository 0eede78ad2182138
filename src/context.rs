//! Cart Context
//!
//! The snapshot of a cart and its customer that shipping rules are matched against.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{Cart, CartError, Customer},
    products::Catalogue,
    tags::{collection::TagCollection, string::StringTagCollection},
};

/// Attributes of a cart and customer needed for rule matching.
#[derive(Debug, Clone, PartialEq)]
pub struct CartContext<'a> {
    /// Customer billing country; may be empty when unknown.
    pub customer_country: String,

    /// Union of the category slugs of every product in the cart.
    pub categories: StringTagCollection,

    /// Union of the declared types of every product in the cart.
    pub product_types: StringTagCollection,

    /// Cart subtotal before shipping and tax.
    pub subtotal: Money<'a, Currency>,
}

impl<'a> CartContext<'a> {
    /// Build a context from explicit parts.
    pub fn new(
        customer_country: impl Into<String>,
        categories: StringTagCollection,
        product_types: StringTagCollection,
        subtotal: Money<'a, Currency>,
    ) -> Self {
        Self {
            customer_country: customer_country.into(),
            categories,
            product_types,
            subtotal,
        }
    }

    /// Derive the context for a cart.
    ///
    /// Products without categories or without a declared type add nothing to
    /// the respective set.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line references a product missing from the
    /// catalogue, or if the subtotal cannot be calculated.
    pub fn extract(
        cart: &Cart,
        catalogue: &Catalogue<'_>,
        customer: &Customer,
    ) -> Result<Self, CartError> {
        let subtotal = cart.subtotal(catalogue)?;

        let mut categories = StringTagCollection::empty();
        let mut product_types = StringTagCollection::empty();

        for (i, line) in cart.lines().iter().enumerate() {
            let product = catalogue
                .get(line.product)
                .ok_or(CartError::UnknownProduct(i))?;

            categories |= product.categories.clone();

            if let Some(product_type) = product.product_type.as_deref() {
                product_types.add(product_type);
            }
        }

        Ok(Self {
            customer_country: customer.billing_country.clone(),
            categories,
            product_types,
            subtotal,
        })
    }

    /// Currency of the subtotal.
    pub fn currency(&self) -> &'a Currency {
        self.subtotal.currency()
    }
}
