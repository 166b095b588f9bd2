//! AppInfra signup core
//!
//! Field validation, password strength scoring and availability checks for
//! a multi-step signup flow:
//! - Username, email and password validators returning structured verdicts
//! - Availability checks against an injected uniqueness lookup
//! - Debounced, cancelable per-field tracking where only the latest check counts
//! - A create-account gate that re-validates and commits through the store

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    check_availability, password_requirements_list, username_requirements_list, validate_email,
    validate_password, validate_username, Availability, DomainError, FieldKind, PasswordRules,
    PasswordStrength, PasswordVerdict, UniquenessLookup, UsernameRules, ValidationVerdict,
};
