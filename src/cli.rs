//! Command line interface

use std::io;

use clap::{Parser, Subcommand};
use percent_shipping::{
    cart::CartError,
    fixtures::FixtureError,
    rules::RuleId,
    service::{ServiceError, ShippingService},
    store::YamlRuleStore,
};
use rusty_money::MoneyError;
use thiserror::Error;

use crate::config::{LoggingConfig, StoreConfig};

mod quote;
mod rules;

/// Errors reported by a command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The service rejected the request.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Fixture files could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The cart could not be read against its catalogue.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Line items could not be totalled.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// A delete was requested without confirmation.
    #[error("refusing to delete shipping rule {0} without --yes")]
    DeleteNotConfirmed(RuleId),
}

#[derive(Debug, Parser)]
#[command(
    name = "percent-shipping",
    about = "Percentage-based shipping rules",
    long_about = None
)]
pub(crate) struct Cli {
    /// Rule storage settings.
    #[command(flatten)]
    pub(crate) store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage shipping rules
    Rules(rules::RulesCommand),

    /// Quote shipping for a fixture cart
    Quote(quote::QuoteArgs),
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Run the selected command, writing its output to `out`.
    pub(crate) fn run(self, out: &mut impl io::Write) -> Result<(), CliError> {
        let service = ShippingService::new(YamlRuleStore::open(&self.store.rules_file));

        match self.command {
            Commands::Rules(command) => rules::run(command, service, out),
            Commands::Quote(args) => quote::run(&args, &service, out),
        }
    }
}
