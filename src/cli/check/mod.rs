//! Check command - availability of a username or email
//!
//! Values are fed to a field tracker in order, as if typed one after the
//! other, and the settled state for the last one is printed.

use std::sync::Arc;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::availability::{AvailabilityChecker, FieldKind, FieldState, FieldTracker};
use crate::infrastructure::account::StaticLookup;

use super::{bootstrap, print_json};

/// Arguments for the check command
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Field to check
    #[arg(value_enum)]
    pub field: CheckField,

    /// Candidate values; only the last one is looked up
    #[arg(required = true)]
    pub values: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CheckField {
    Username,
    Email,
}

impl From<CheckField> for FieldKind {
    fn from(field: CheckField) -> Self {
        match field {
            CheckField::Username => FieldKind::Username,
            CheckField::Email => FieldKind::Email,
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    field: FieldKind,
    value: String,
    #[serde(flatten)]
    state: FieldState,
}

/// Run the check command
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = bootstrap();
    let kind = FieldKind::from(args.field);

    let state = settle(&config, kind, &args.values).await?;
    let value = args.values.last().cloned().unwrap_or_default();

    print_json(&CheckReport {
        field: kind,
        value,
        state,
    })
}

async fn settle(config: &AppConfig, kind: FieldKind, values: &[String]) -> anyhow::Result<FieldState> {
    let availability = &config.availability;
    let lookup = StaticLookup::new(
        availability.taken_usernames.iter().cloned(),
        availability.taken_emails.iter(),
    );
    let checker = AvailabilityChecker::new(Arc::new(lookup), config.validation.username.clone());
    let tracker = FieldTracker::new(kind, checker, availability.debounce());

    let mut states = tracker.subscribe();
    for value in values {
        tracker.on_change(value.as_str());
    }

    info!(field = %kind, edits = values.len(), "Waiting for availability to settle");

    loop {
        let state = states.borrow_and_update().clone();
        if state.is_settled() {
            return Ok(state);
        }
        states.changed().await?;
    }
}
