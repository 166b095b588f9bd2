//! Field validation
//!
//! Pure validators for the signup candidates: usernames, emails and
//! passwords (including strength scoring). Validators never fail; every
//! outcome is encoded in a verdict.

mod email;
mod password;
mod username;
mod verdict;

use serde::{Deserialize, Serialize};

pub use email::{normalize_email, validate_email, MAX_EMAIL_LENGTH, MAX_LOCAL_PART_LENGTH};
pub use password::{
    password_requirements_list, validate_password, PasswordRules, SPECIAL_CHARACTERS,
};
pub use username::{username_requirements_list, validate_username, UsernameRules};
pub use verdict::{PasswordStrength, PasswordVerdict, ValidationVerdict};

/// Rule sets for the configurable validators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub username: UsernameRules,
    pub password: PasswordRules,
}
