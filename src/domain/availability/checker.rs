//! Availability checks
//!
//! A candidate is validated locally first. Only structurally valid
//! candidates reach the uniqueness lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::validation::{
    normalize_email, validate_email, validate_username, UsernameRules, ValidationVerdict,
};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Fields that carry a uniqueness constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Username,
    Email,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value someone is trying to register for a unique field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCandidate {
    pub kind: FieldKind,
    pub value: String,
}

impl FieldCandidate {
    pub fn new(kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn username(value: impl Into<String>) -> Self {
        Self::new(FieldKind::Username, value)
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self::new(FieldKind::Email, value)
    }

    /// Value as sent to the lookup: emails lowercased, usernames verbatim
    pub fn normalized_value(&self) -> String {
        match self.kind {
            FieldKind::Username => self.value.clone(),
            FieldKind::Email => normalize_email(&self.value),
        }
    }
}

/// Outcome of an availability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    /// Valid and not present in the store
    Available,
    /// Valid but already registered
    Taken,
    /// Rejected by local validation; the store was not consulted
    Invalid(ValidationVerdict),
    /// The store could not answer; neither available nor taken
    LookupFailed { reason: String },
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Taken => "taken",
            Self::Invalid(_) => "invalid",
            Self::LookupFailed { .. } => "lookup_failed",
        }
    }
}

/// Answers whether a value is already registered for a unique field
///
/// Must be safe to call concurrently for different fields. Implementations
/// receive normalized values.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UniquenessLookup: Send + Sync {
    async fn exists(&self, kind: FieldKind, value: &str) -> Result<bool, DomainError>;
}

/// Run the validator that matches the candidate's field
pub fn validate_candidate(candidate: &FieldCandidate, rules: &UsernameRules) -> ValidationVerdict {
    match candidate.kind {
        FieldKind::Username => validate_username(&candidate.value, rules),
        FieldKind::Email => validate_email(&candidate.value),
    }
}

/// Check whether a candidate may be registered
///
/// Lookup failures are reported as [`Availability::LookupFailed`] and
/// never as available.
pub async fn check_availability<L>(
    candidate: &FieldCandidate,
    rules: &UsernameRules,
    lookup: &L,
) -> Availability
where
    L: UniquenessLookup + ?Sized,
{
    let verdict = validate_candidate(candidate, rules);

    if !verdict.is_valid() {
        debug!(
            field = %candidate.kind,
            errors = verdict.errors().len(),
            "Candidate failed validation, skipping lookup"
        );
        return Availability::Invalid(verdict);
    }

    let value = candidate.normalized_value();

    match lookup.exists(candidate.kind, &value).await {
        Ok(true) => {
            debug!(field = %candidate.kind, "Candidate already taken");
            Availability::Taken
        }
        Ok(false) => Availability::Available,
        Err(e) => {
            warn!(field = %candidate.kind, error = %e, "Uniqueness lookup failed");
            Availability::LookupFailed {
                reason: e.to_string(),
            }
        }
    }
}

/// Reusable availability checker bound to a lookup and username rules
#[derive(Debug)]
pub struct AvailabilityChecker<L: UniquenessLookup> {
    lookup: Arc<L>,
    rules: UsernameRules,
}

impl<L: UniquenessLookup> Clone for AvailabilityChecker<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            rules: self.rules.clone(),
        }
    }
}

impl<L: UniquenessLookup> AvailabilityChecker<L> {
    pub fn new(lookup: Arc<L>, rules: UsernameRules) -> Self {
        Self { lookup, rules }
    }

    pub fn rules(&self) -> &UsernameRules {
        &self.rules
    }

    /// Validate without consulting the store
    pub fn validate(&self, candidate: &FieldCandidate) -> ValidationVerdict {
        validate_candidate(candidate, &self.rules)
    }

    pub async fn check(&self, candidate: &FieldCandidate) -> Availability {
        check_availability(candidate, &self.rules, self.lookup.as_ref()).await
    }

    pub async fn check_username(&self, username: &str) -> Availability {
        self.check(&FieldCandidate::username(username)).await
    }

    pub async fn check_email(&self, email: &str) -> Availability {
        self.check(&FieldCandidate::email(email)).await
    }

    /// Check a username and an email concurrently
    pub async fn check_pair(&self, username: &str, email: &str) -> (Availability, Availability) {
        futures::join!(self.check_username(username), self.check_email(email))
    }
}
