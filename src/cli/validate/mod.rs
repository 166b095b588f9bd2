//! Validate command - runs a field validator and prints its verdict

use clap::{Args, Subcommand};
use tracing::debug;

use crate::domain::validation::{validate_email, validate_password, validate_username};

use super::{bootstrap, print_json};

/// Arguments for the validate command
#[derive(Args, Clone)]
pub struct ValidateArgs {
    #[command(subcommand)]
    pub field: ValidateField,
}

#[derive(Subcommand, Clone)]
pub enum ValidateField {
    /// Validate a username against the configured rules
    Username { value: String },

    /// Validate an email address
    Email { value: String },

    /// Validate and score a password against the configured rules
    Password { value: String },
}

/// Run the validate command
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let config = bootstrap();
    let rules = &config.validation;

    match args.field {
        ValidateField::Username { value } => {
            let verdict = validate_username(&value, &rules.username);
            debug!(valid = verdict.is_valid(), "Username validated");
            print_json(&verdict)
        }
        ValidateField::Email { value } => {
            let verdict = validate_email(&value);
            debug!(valid = verdict.is_valid(), "Email validated");
            print_json(&verdict)
        }
        ValidateField::Password { value } => {
            let verdict = validate_password(&value, &rules.password);
            debug!(
                valid = verdict.is_valid(),
                score = verdict.score(),
                strength = %verdict.strength(),
                "Password validated"
            );
            print_json(&verdict)
        }
    }
}
