//! Rule Drafts
//!
//! Unvalidated rule input, as submitted by an administrator or read back from storage.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    products::{ProductType, UnknownProductType},
    rules::{
        RuleDefinition,
        percentage::{PercentageError, RulePercentage},
    },
    tags::{collection::TagCollection, string::StringTagCollection},
};

/// Reasons a [`RuleDraft`] is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleValidationError {
    /// Title was empty or whitespace.
    #[error("title is required")]
    MissingTitle,

    /// Percentage was not provided.
    #[error("percentage is required")]
    MissingPercentage,

    /// Country is neither empty nor a two-letter upper-case code.
    #[error("invalid country code: {0:?}")]
    InvalidCountry(String),

    /// A category slug was empty or whitespace.
    #[error("category slugs cannot be blank")]
    BlankCategory,

    /// A product type is not one of the known types.
    #[error(transparent)]
    UnknownProductType(#[from] UnknownProductType),

    /// Percentage is outside `0..=100`.
    #[error(transparent)]
    Percentage(#[from] PercentageError),
}

/// Rule fields before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleDraft {
    /// Display title
    pub title: String,

    /// Country code, or empty for any country
    pub country: String,

    /// Category slugs; empty for any category
    pub categories: Vec<String>,

    /// Product type slugs; empty for any type
    pub product_types: Vec<String>,

    /// Percentage points of the cart subtotal
    pub percentage: Option<Decimal>,

    /// Whether the rule is considered when quoting
    pub active: bool,
}

impl RuleDraft {
    /// Validate the draft into a rule ready for storage.
    ///
    /// Title and category slugs are trimmed. Country codes are not re-cased:
    /// `"es"` is rejected rather than turned into `"ES"`.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleValidationError`] found.
    pub fn validate(&self) -> Result<RuleDefinition, RuleValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(RuleValidationError::MissingTitle);
        }

        let country = self.country.trim();
        if !is_valid_country(country) {
            return Err(RuleValidationError::InvalidCountry(self.country.clone()));
        }

        let mut categories = StringTagCollection::empty();
        for category in &self.categories {
            let category = category.trim();
            if category.is_empty() {
                return Err(RuleValidationError::BlankCategory);
            }

            categories.add(category);
        }

        let mut product_types = StringTagCollection::empty();
        for product_type in &self.product_types {
            let product_type = product_type.trim().parse::<ProductType>()?;

            product_types.add(product_type.as_str());
        }

        let points = self
            .percentage
            .ok_or(RuleValidationError::MissingPercentage)?;
        let percentage = RulePercentage::try_from(points)?;

        Ok(RuleDefinition {
            title: title.to_string(),
            country: country.to_string(),
            categories,
            product_types,
            percentage,
            active: self.active,
        })
    }
}

/// Empty (any country) or an ISO 3166-1 alpha-2 shaped code.
fn is_valid_country(country: &str) -> bool {
    country.is_empty() || (country.len() == 2 && country.bytes().all(|b| b.is_ascii_uppercase()))
}
