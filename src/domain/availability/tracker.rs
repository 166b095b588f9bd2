//! Per-field availability state tracking
//!
//! Tracks what a signup form shows for one unique field:
//!
//! ```text
//! Empty -> Validating -> Invalid
//!                     -> CheckingAvailability -> Available | Taken | LookupFailed
//! ```
//!
//! Each new value restarts the machine. Lookups are debounced and only the
//! most recent one may update the state.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use super::checker::{Availability, AvailabilityChecker, FieldCandidate, FieldKind, UniquenessLookup};
use super::debounce::Debouncer;
use crate::domain::validation::ValidationVerdict;

/// Client-perceived state of a unique field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FieldState {
    Empty,
    Validating,
    Invalid(ValidationVerdict),
    CheckingAvailability,
    Available,
    Taken,
    LookupFailed { reason: String },
}

impl FieldState {
    /// Whether the state is final for the current value
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Validating | Self::CheckingAvailability)
    }
}

impl From<Availability> for FieldState {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Available => Self::Available,
            Availability::Taken => Self::Taken,
            Availability::Invalid(verdict) => Self::Invalid(verdict),
            Availability::LookupFailed { reason } => Self::LookupFailed { reason },
        }
    }
}

/// Drives the state machine of one unique field
pub struct FieldTracker<L: UniquenessLookup + 'static> {
    kind: FieldKind,
    checker: AvailabilityChecker<L>,
    debouncer: Debouncer,
    state: Arc<watch::Sender<FieldState>>,
}

impl<L: UniquenessLookup + 'static> FieldTracker<L> {
    pub fn new(kind: FieldKind, checker: AvailabilityChecker<L>, quiet_period: Duration) -> Self {
        let (state, _) = watch::channel(FieldState::Empty);

        Self {
            kind,
            checker,
            debouncer: Debouncer::new(quiet_period),
            state: Arc::new(state),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Current state snapshot
    pub fn state(&self) -> FieldState {
        self.state.borrow().clone()
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<FieldState> {
        self.state.subscribe()
    }

    /// React to a new field value
    ///
    /// Validation runs immediately. Structurally valid values are looked up
    /// after the quiet period unless another change arrives first.
    pub fn on_change(&self, value: impl Into<String>) {
        let value = value.into();
        self.debouncer.cancel();

        if value.is_empty() {
            self.state.send_replace(FieldState::Empty);
            return;
        }

        self.state.send_replace(FieldState::Validating);

        let candidate = FieldCandidate::new(self.kind, value);
        let verdict = self.checker.validate(&candidate);

        if !verdict.is_valid() {
            self.state.send_replace(FieldState::Invalid(verdict));
            return;
        }

        let checker = self.checker.clone();
        let state = Arc::clone(&self.state);

        self.debouncer.schedule(move |ticket| async move {
            let started = ticket.commit(|| {
                state.send_replace(FieldState::CheckingAvailability);
            });

            if !started {
                return;
            }

            let outcome = FieldState::from(checker.check(&candidate).await);
            ticket.commit(|| {
                state.send_replace(outcome);
            });
        });
    }

    /// Drop any pending lookup and reset to empty
    pub fn clear(&self) {
        self.on_change(String::new());
    }
}
