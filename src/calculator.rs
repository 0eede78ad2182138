//! Shipping Cost Calculation

use std::fmt;

use rusty_money::{Money, MoneyError, iso::Currency};

use crate::rules::ShippingRule;

/// One shipping charge shown to the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    /// Rule title
    pub label: String,

    /// Charge; may be zero
    pub amount: Money<'a, Currency>,
}

impl fmt::Display for LineItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.amount)
    }
}

/// Produce one line item per matched rule, in order.
///
/// Each amount is `subtotal × percentage / 100`, rounded half-up to the
/// currency's minor unit.
pub fn compute<'a>(matched: &[&ShippingRule], subtotal: &Money<'a, Currency>) -> Vec<LineItem<'a>> {
    let minor = subtotal.to_minor_units();

    matched
        .iter()
        .map(|rule| LineItem {
            label: rule.title().to_string(),
            amount: Money::from_minor(rule.percentage().of_minor(minor), subtotal.currency()),
        })
        .collect()
}

/// Sum of the line item amounts.
///
/// # Errors
///
/// Returns a [`MoneyError`] if a line item is in a different currency.
pub fn total<'a>(
    line_items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    line_items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line_item| {
            acc.add(line_item.amount)
        })
}
