//! Products

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::tags::string::StringTagCollection;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product types a shipping rule may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    /// A single, stand-alone product.
    Simple,

    /// A product with selectable variations.
    Variable,

    /// A group of related products sold together.
    Grouped,

    /// A product sold elsewhere and linked to.
    External,
}

impl ProductType {
    /// Every product type, in display order.
    pub const ALL: [ProductType; 4] = [
        ProductType::Simple,
        ProductType::Variable,
        ProductType::Grouped,
        ProductType::External,
    ];

    /// The slug used in rule constraints and cart attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Simple => "simple",
            ProductType::Variable => "variable",
            ProductType::Grouped => "grouped",
            ProductType::External => "external",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known product types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown product type: {0}")]
pub struct UnknownProductType(pub String);

impl FromStr for ProductType {
    type Err = UnknownProductType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|product_type| product_type.as_str() == s)
            .ok_or_else(|| UnknownProductType(s.to_string()))
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Category slugs the product is assigned to
    pub categories: StringTagCollection,

    /// Declared product type, if any.
    ///
    /// Kept as a raw string: the host may report types this crate does not
    /// know about, and those simply never match a rule.
    pub product_type: Option<String>,

    /// Unit price
    pub price: Money<'a, Currency>,
}

/// Products available to carts, addressed by [`ProductKey`].
#[derive(Debug, Default)]
pub struct Catalogue<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
}

impl<'a> Catalogue<'a> {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self {
            products: SlotMap::with_key(),
        }
    }

    /// Add a product, returning its key.
    pub fn insert(&mut self, product: Product<'a>) -> ProductKey {
        self.products.insert(product)
    }

    /// Look up a product.
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Number of products in the catalogue.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalogue has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
