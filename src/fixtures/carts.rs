//! Cart Fixtures

use serde::Deserialize;

use crate::cart::Customer;

/// Cart fixture file
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart currency code; defaults to the products' currency
    #[serde(default)]
    pub currency: Option<String>,

    /// The customer placing the order
    #[serde(default)]
    pub customer: Customer,

    /// Cart lines, in order
    #[serde(default)]
    pub items: Vec<CartItemFixture>,
}

/// One cart line, referencing a product by its fixture key
#[derive(Debug, Deserialize)]
pub struct CartItemFixture {
    /// Product key in the products fixture
    pub product: String,

    /// Units of the product
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
