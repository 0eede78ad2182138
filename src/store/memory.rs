//! In-memory Rule Store

use std::collections::BTreeMap;

use crate::{
    rules::{RuleDefinition, RuleId, ShippingRule},
    store::{RuleStore, StoreError},
};

/// Rule store kept entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryRuleStore {
    rules: BTreeMap<RuleId, ShippingRule>,
    next_id: u64,
}

impl Default for MemoryRuleStore {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryRuleStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the store holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleStore for MemoryRuleStore {
    fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn create(&mut self, rule: RuleDefinition) -> Result<RuleId, StoreError> {
        let id = RuleId::new(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;

        self.rules.insert(id, ShippingRule::new(id, rule));

        Ok(id)
    }

    fn update(&mut self, id: RuleId, rule: RuleDefinition) -> Result<(), StoreError> {
        let stored = self.rules.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *stored = ShippingRule::new(id, rule);

        Ok(())
    }

    fn delete(&mut self, id: RuleId) -> Result<(), StoreError> {
        self.rules.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    fn get(&self, id: RuleId) -> Result<ShippingRule, StoreError> {
        self.rules.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn list_all(&self) -> Result<Vec<ShippingRule>, StoreError> {
        Ok(self.rules.values().cloned().collect())
    }
}
