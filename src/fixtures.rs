//! Fixtures
//!
//! YAML product catalogues and carts, used to drive quotes from the command
//! line and in tests.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, Customer},
    fixtures::{carts::CartFixture, products::ProductsFixture},
    products::{Catalogue, Product, ProductKey},
};

pub mod carts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded products
    catalogue: Catalogue<'static>,

    /// String key -> catalogue key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Currency shared by every loaded product
    currency: Option<&'static Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalogue: Catalogue::new(),
            product_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load products from `products/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the products
    /// are not all priced in one currency.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let product = Product::try_from(product_fixture)?;
            let currency = product.price.currency();

            match self.currency {
                Some(existing) if existing != currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => self.currency = Some(currency),
            }

            let product_key = self.catalogue.insert(product);

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load a cart and its customer from `carts/<name>.yml`.
    ///
    /// The cart currency defaults to the products' currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if it references
    /// an unknown product, or if no currency can be determined.
    pub fn load_cart(&self, name: &str) -> Result<(Cart, Customer), FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        let currency = match fixture.currency.as_deref() {
            Some(code) => products::parse_currency(code)?,
            None => self.currency.ok_or(FixtureError::NoCurrency)?,
        };

        let mut cart = Cart::new(currency);

        for item in fixture.items {
            cart.push(self.product_key(&item.product)?, item.quantity);
        }

        Ok((cart, fixture.customer))
    }

    /// Loaded products
    pub fn catalogue(&self) -> &Catalogue<'static> {
        &self.catalogue
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'static>, FixtureError> {
        self.catalogue
            .get(self.product_key(key)?)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Currency of the loaded products, if any were loaded
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rusty_money::{Money, iso::EUR};
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn write(dir: &Path, kind: &str, name: &str, contents: &str) -> TestResult {
        let kind_dir = dir.join(kind);
        fs::create_dir_all(&kind_dir)?;
        fs::write(kind_dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn loads_products_and_cart() -> TestResult {
        let dir = TempDir::new()?;
        write(
            dir.path(),
            "products",
            "shop",
            "products:\n  mug:\n    name: Mug\n    categories: [kitchen]\n    type: simple\n    price: \"8.00 EUR\"\n",
        )?;
        write(
            dir.path(),
            "carts",
            "order",
            "customer:\n  country: IE\nitems:\n  - product: mug\n    quantity: 3\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_products("shop")?;
        let (cart, customer) = fixture.load_cart("order")?;

        assert_eq!(fixture.currency(), Some(EUR));
        assert_eq!(fixture.product("mug")?.name, "Mug");
        assert_eq!(customer.billing_country, "IE");
        assert_eq!(cart.currency(), EUR);
        assert_eq!(cart.subtotal(fixture.catalogue())?, Money::from_minor(2_400, EUR));

        Ok(())
    }

    #[test]
    fn rejects_mixed_product_currencies() -> TestResult {
        let dir = TempDir::new()?;
        write(
            dir.path(),
            "products",
            "mixed",
            "products:\n  a:\n    name: A\n    price: \"1.00 EUR\"\n  b:\n    name: B\n    price: \"1.00 GBP\"\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_products("mixed"),
            Err(FixtureError::CurrencyMismatch(_, _))
        ));

        Ok(())
    }

    #[test]
    fn cart_with_unknown_product_is_rejected() -> TestResult {
        let dir = TempDir::new()?;
        write(dir.path(), "carts", "ghost", "currency: EUR\nitems:\n  - product: ghost\n")?;

        let fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_cart("ghost"),
            Err(FixtureError::ProductNotFound(key)) if key == "ghost"
        ));

        Ok(())
    }

    #[test]
    fn cart_without_currency_needs_products() -> TestResult {
        let dir = TempDir::new()?;
        write(dir.path(), "carts", "empty", "items: []\n")?;

        let fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(fixture.load_cart("empty"), Err(FixtureError::NoCurrency)));

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut fixture = Fixture::with_base_path("/nonexistent/fixtures");

        assert!(matches!(fixture.load_products("nope"), Err(FixtureError::Io(_))));
    }
}
