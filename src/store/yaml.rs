//! YAML File Rule Store
//!
//! Keeps every rule in a single YAML document. Each write rewrites the whole
//! file into a sibling temporary file and then renames it over the original, so
//! readers never observe a half-written document.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::{
    rules::{RuleDefinition, RuleId, ShippingRule},
    store::{
        RuleStore, StoreError,
        records::{RuleRecord, RulesDocument},
    },
};

/// Rule store backed by a YAML file.
#[derive(Debug, Clone)]
pub struct YamlRuleStore {
    path: PathBuf,
}

impl YamlRuleStore {
    /// Open the store at `path`, creating an empty rules file if none exists.
    ///
    /// A failure to create the file is logged and otherwise ignored; later
    /// operations report their own errors.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self { path: path.into() };

        if let Err(err) = store.ensure_schema() {
            error!(path = %store.path.display(), error = %err, "failed to initialise shipping rules file");
        }

        store
    }

    /// Location of the rules file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<RulesDocument, StoreError> {
        let contents = fs::read_to_string(&self.path)?;

        if contents.trim().is_empty() {
            return Ok(RulesDocument::default());
        }

        Ok(serde_norway::from_str(&contents)?)
    }

    fn save(&self, document: &RulesDocument) -> Result<(), StoreError> {
        let yaml = serde_norway::to_string(document)?;

        let mut file = NamedTempFile::new_in(self.parent_dir())?;
        file.write_all(yaml.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path)?;

        debug!(path = %self.path.display(), rule_count = document.rules.len(), "wrote shipping rules file");

        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl RuleStore for YamlRuleStore {
    #[tracing::instrument(
        name = "rules.store.ensure_schema",
        skip(self),
        fields(path = %self.path.display()),
        err
    )]
    fn ensure_schema(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }

        fs::create_dir_all(self.parent_dir())?;
        self.save(&RulesDocument::default())?;

        info!("created shipping rules file");

        Ok(())
    }

    #[tracing::instrument(
        name = "rules.store.create",
        skip(self, rule),
        fields(path = %self.path.display(), rule_id = tracing::field::Empty),
        err
    )]
    fn create(&mut self, rule: RuleDefinition) -> Result<RuleId, StoreError> {
        let mut document = self.load()?;

        let id = document.allocate_id()?;

        tracing::Span::current().record("rule_id", id.get());

        document.rules.push(RuleRecord::from(&ShippingRule::new(id, rule)));
        document.rules.sort_by_key(|record| record.id);

        self.save(&document)?;

        info!(rule_id = %id, "created shipping rule");

        Ok(id)
    }

    #[tracing::instrument(
        name = "rules.store.update",
        skip(self, rule),
        fields(path = %self.path.display(), rule_id = %id),
        err
    )]
    fn update(&mut self, id: RuleId, rule: RuleDefinition) -> Result<(), StoreError> {
        let mut document = self.load()?;

        let record = document.record_mut(id).ok_or(StoreError::NotFound(id))?;
        *record = RuleRecord::from(&ShippingRule::new(id, rule));

        self.save(&document)?;

        info!(rule_id = %id, "updated shipping rule");

        Ok(())
    }

    #[tracing::instrument(
        name = "rules.store.delete",
        skip(self),
        fields(path = %self.path.display(), rule_id = %id),
        err
    )]
    fn delete(&mut self, id: RuleId) -> Result<(), StoreError> {
        let mut document = self.load()?;

        if !document.remove(id) {
            return Err(StoreError::NotFound(id));
        }

        self.save(&document)?;

        info!(rule_id = %id, "deleted shipping rule");

        Ok(())
    }

    fn get(&self, id: RuleId) -> Result<ShippingRule, StoreError> {
        self.list_all()?
            .into_iter()
            .find(|rule| rule.id() == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn list_all(&self) -> Result<Vec<ShippingRule>, StoreError> {
        self.load()?.to_rules()
    }
}
