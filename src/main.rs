//! Percent Shipping CLI

use std::{io, process::ExitCode};

use tracing::error;

use crate::cli::Cli;

mod cli;
mod config;
mod observability;

/// Percent Shipping CLI entry point
pub fn main() -> ExitCode {
    let cli = Cli::load().unwrap_or_else(|err| err.exit());

    if let Err(err) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{err}");
        }

        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();

    match cli.run(&mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");

            #[expect(
                clippy::print_stderr,
                reason = "command errors are reported to the user regardless of log level"
            )]
            {
                eprintln!("error: {err}");
            }

            ExitCode::FAILURE
        }
    }
}
