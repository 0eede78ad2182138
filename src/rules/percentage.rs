//! Rule Percentage

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a [`RulePercentage`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PercentageError {
    /// The value is outside `0..=100`.
    #[error("percentage {0} is outside the range 0-100")]
    OutOfRange(Decimal),

    /// The value is not a number.
    #[error("invalid percentage: {0}")]
    Invalid(String),
}

/// A shipping charge in percentage points of the cart subtotal, within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct RulePercentage(Decimal);

impl RulePercentage {
    /// 0%
    pub const ZERO: RulePercentage = RulePercentage(Decimal::ZERO);

    /// 100%
    pub const HUNDRED: RulePercentage = RulePercentage(Decimal::ONE_HUNDRED);

    /// The percentage in points, e.g. `12.5` for 12.5%.
    pub fn points(self) -> Decimal {
        self.0
    }

    /// Apply the percentage to an amount in minor units, rounding half-up to
    /// the nearest minor unit.
    ///
    /// The result never exceeds `minor` in magnitude; if the arithmetic cannot
    /// be represented it saturates to `minor`.
    pub fn of_minor(self, minor: i64) -> i64 {
        Decimal::from(minor)
            .checked_mul(self.0)
            .and_then(|applied| applied.checked_div(Decimal::ONE_HUNDRED))
            .map(|applied| applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|rounded| rounded.to_i64())
            .unwrap_or(minor)
    }
}

impl TryFrom<Decimal> for RulePercentage {
    type Error = PercentageError;

    fn try_from(points: Decimal) -> Result<Self, Self::Error> {
        if (Self::ZERO.0..=Self::HUNDRED.0).contains(&points) {
            Ok(Self(points.normalize()))
        } else {
            Err(PercentageError::OutOfRange(points))
        }
    }
}

impl From<RulePercentage> for Decimal {
    fn from(percentage: RulePercentage) -> Self {
        percentage.0
    }
}

/// Parses `"12.5"` or `"12.5%"`, both meaning twelve and a half percent.
impl FromStr for RulePercentage {
    type Err = PercentageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

        let points = number
            .parse::<Decimal>()
            .map_err(|_err| PercentageError::Invalid(s.to_string()))?;

        Self::try_from(points)
    }
}

impl fmt::Display for RulePercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
