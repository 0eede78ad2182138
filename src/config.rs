//! Configuration

use std::path::PathBuf;

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub(crate) log_format: LogFormat,
}

/// Rule storage settings.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Path of the YAML file holding the shipping rules
    #[arg(
        long,
        env = "SHIPPING_RULES_FILE",
        default_value = "shipping-rules.yml",
        global = true
    )]
    pub(crate) rules_file: PathBuf,
}
