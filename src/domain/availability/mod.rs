//! Availability checking
//!
//! Combines local validation with an injected uniqueness lookup, and
//! provides the debounce discipline used when checks follow user edits.

mod checker;
mod debounce;
mod tracker;

pub use checker::{
    check_availability, validate_candidate, Availability, AvailabilityChecker, FieldCandidate,
    FieldKind, UniquenessLookup,
};
pub use debounce::{CheckToken, Debouncer, LatestToken, Ticket, DEFAULT_QUIET_PERIOD};
pub use tracker::{FieldState, FieldTracker};

#[cfg(test)]
pub use checker::MockUniquenessLookup;
