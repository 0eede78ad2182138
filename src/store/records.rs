//! Rule Records
//!
//! The on-disk shape of the rules file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    rules::{RuleId, ShippingRule, draft::RuleDraft},
    store::StoreError,
};

/// One stored rule row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Rule id
    pub id: RuleId,

    /// Display title
    pub title: String,

    /// Country code, or empty
    #[serde(default)]
    pub country: String,

    /// Category slugs
    #[serde(default)]
    pub categories: Vec<String>,

    /// Product type slugs
    #[serde(default)]
    pub product_types: Vec<String>,

    /// Percentage points
    pub percentage: Decimal,

    /// Whether the rule is active
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<&ShippingRule> for RuleRecord {
    fn from(rule: &ShippingRule) -> Self {
        let draft = rule.to_draft();

        Self {
            id: rule.id(),
            title: draft.title,
            country: draft.country,
            categories: draft.categories,
            product_types: draft.product_types,
            percentage: rule.percentage().points(),
            active: draft.active,
        }
    }
}

impl TryFrom<RuleRecord> for ShippingRule {
    type Error = StoreError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        let draft = RuleDraft {
            title: record.title,
            country: record.country,
            categories: record.categories,
            product_types: record.product_types,
            percentage: Some(record.percentage),
            active: record.active,
        };

        let definition = draft.validate().map_err(|source| StoreError::CorruptRecord {
            id: record.id,
            source,
        })?;

        Ok(ShippingRule::new(record.id, definition))
    }
}

/// The whole rules file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesDocument {
    /// Id handed to the next created rule; ids are never reused.
    pub next_id: u64,

    /// Stored rows, in ascending id order.
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
}

impl Default for RulesDocument {
    fn default() -> Self {
        Self {
            next_id: 1,
            rules: Vec::new(),
        }
    }
}

impl RulesDocument {
    /// Reserve the next id.
    ///
    /// The counter never hands out an id at or below one already stored, even
    /// if the file was edited by hand.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdsExhausted`] when the counter cannot advance.
    pub fn allocate_id(&mut self) -> Result<RuleId, StoreError> {
        if let Some(highest) = self.rules.iter().map(|record| record.id.get()).max() {
            let floor = highest.checked_add(1).ok_or(StoreError::IdsExhausted)?;
            self.next_id = self.next_id.max(floor);
        }

        let id = RuleId::new(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;

        Ok(id)
    }

    /// Validate every row into a rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptRecord`] for the first invalid row and
    /// [`StoreError::DuplicateId`] if two rows share an id.
    pub fn to_rules(&self) -> Result<Vec<ShippingRule>, StoreError> {
        let mut rules = self
            .rules
            .iter()
            .cloned()
            .map(ShippingRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        rules.sort_by_key(ShippingRule::id);

        let duplicate = rules.windows(2).find_map(|pair| match pair {
            [left, right] if left.id() == right.id() => Some(left.id()),
            _ => None,
        });

        if let Some(id) = duplicate {
            return Err(StoreError::DuplicateId(id));
        }

        Ok(rules)
    }

    /// Mutable access to the row with this id.
    pub fn record_mut(&mut self, id: RuleId) -> Option<&mut RuleRecord> {
        self.rules.iter_mut().find(|record| record.id == id)
    }

    /// Remove the row with this id, returning whether it existed.
    pub fn remove(&mut self, id: RuleId) -> bool {
        let before = self.rules.len();
        self.rules.retain(|record| record.id != id);

        self.rules.len() != before
    }
}
