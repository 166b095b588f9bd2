//! Registration errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::availability::FieldKind;
use crate::domain::DomainError;

/// Fields collected by the signup flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupField {
    Username,
    Email,
    Password,
}

impl SignupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl From<FieldKind> for SignupField {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Username => Self::Username,
            FieldKind::Email => Self::Email,
        }
    }
}

impl std::fmt::Display for SignupField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons an account could not be created
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Username, email, password, and password confirmation are required")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{field} validation failed")]
    Invalid {
        field: SignupField,
        errors: Vec<String>,
    },

    #[error("This {0} is already taken")]
    Taken(SignupField),

    /// The uniqueness lookup could not answer; the field is indeterminate
    #[error("Could not verify {field} availability: {source}")]
    LookupFault {
        field: SignupField,
        #[source]
        source: DomainError,
    },

    /// The store rejected the insert because another registration won
    /// the race after the availability check passed
    #[error("This {field} was registered while the account was being created")]
    ConflictAtCommit { field: SignupField },

    #[error(transparent)]
    Storage(DomainError),
}

impl RegistrationError {
    /// Field the caller should re-prompt for, if any
    pub fn field(&self) -> Option<SignupField> {
        match self {
            Self::Invalid { field, .. }
            | Self::Taken(field)
            | Self::LookupFault { field, .. }
            | Self::ConflictAtCommit { field } => Some(*field),
            Self::PasswordMismatch => Some(SignupField::Password),
            Self::MissingFields | Self::Storage(_) => None,
        }
    }

    /// Human-readable reasons, suitable for a form
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Invalid { errors, .. } => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}
