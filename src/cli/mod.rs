//! CLI module for the signup core
//!
//! Subcommands print JSON to stdout; logs go to stderr.

pub mod check;
pub mod requirements;
pub mod validate;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// AppInfra signup - validate signup fields and check availability
#[derive(Parser)]
#[command(name = "appinfra-signup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a single field and print the verdict
    Validate(validate::ValidateArgs),

    /// Check whether a username or email is available
    Check(check::CheckArgs),

    /// Print the human-readable requirements for a field
    Requirements(requirements::RequirementsArgs),
}

/// Load `.env` and configuration, then start logging
///
/// A configuration that fails to load falls back to the defaults.
pub fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init_logging(&config.logging);

    if let Err(e) = loaded {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    config
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
