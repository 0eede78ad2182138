//! Rule Storage
//!
//! CRUD access to shipping rules. Listings are ordered by ascending id.

use thiserror::Error;

use crate::rules::{RuleDefinition, RuleId, ShippingRule, draft::RuleValidationError};

pub mod memory;
pub mod records;
pub mod yaml;

pub use memory::MemoryRuleStore;
pub use yaml::YamlRuleStore;

/// Rule store error variants.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No rule has this id.
    #[error("shipping rule {0} not found")]
    NotFound(RuleId),

    /// Two stored rows share an id.
    #[error("shipping rule {0} is stored more than once")]
    DuplicateId(RuleId),

    /// A stored row no longer passes validation.
    #[error("stored shipping rule {id} is invalid")]
    CorruptRecord {
        /// Id of the offending row
        id: RuleId,

        /// Why the row was rejected
        #[source]
        source: RuleValidationError,
    },

    /// The id counter is exhausted.
    #[error("no shipping rule ids left")]
    IdsExhausted,

    /// Reading or writing the backing file failed.
    #[error("storage I/O error")]
    Io(#[from] std::io::Error),

    /// The backing file could not be parsed or written as YAML.
    #[error("storage format error")]
    Yaml(#[from] serde_norway::Error),

    /// The rewritten file could not replace the old one.
    #[error("failed to replace storage file")]
    Persist(#[from] tempfile::PersistError),
}

/// Persistent collection of shipping rules.
#[cfg_attr(test, mockall::automock)]
pub trait RuleStore {
    /// Create the backing storage if it does not exist yet. Safe to call on
    /// every startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be created.
    fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Insert a rule, returning its newly assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be written.
    fn create(&mut self, rule: RuleDefinition) -> Result<RuleId, StoreError>;

    /// Overwrite every field of an existing rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id, or an error if the
    /// rule cannot be written.
    fn update(&mut self, id: RuleId, rule: RuleDefinition) -> Result<(), StoreError>;

    /// Remove a rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id, or an error if the
    /// change cannot be written.
    fn delete(&mut self, id: RuleId) -> Result<(), StoreError>;

    /// Fetch a rule by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id, or an error if the
    /// rules cannot be read.
    fn get(&self, id: RuleId) -> Result<ShippingRule, StoreError>;

    /// Every rule, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be read.
    fn list_all(&self) -> Result<Vec<ShippingRule>, StoreError>;

    /// Only the active rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be read.
    fn list_active(&self) -> Result<Vec<ShippingRule>, StoreError> {
        let mut rules = self.list_all()?;
        rules.retain(|rule| rule.is_active());

        Ok(rules)
    }
}
