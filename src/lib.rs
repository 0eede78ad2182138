//! Percent Shipping
//!
//! Percentage-based shipping rules: administrators store rules restricted by
//! customer country, product category and product type, and each cart is
//! quoted one shipping line item per matching rule, priced as a percentage of
//! the cart subtotal.

pub mod calculator;
pub mod cart;
pub mod context;
pub mod fixtures;
pub mod matcher;
pub mod prelude;
pub mod products;
pub mod rules;
pub mod service;
pub mod store;
pub mod tags;
