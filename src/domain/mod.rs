//! Domain layer - Core signup rules and entities

pub mod account;
pub mod auth;
pub mod availability;
pub mod error;
pub mod registration;
pub mod validation;

pub use account::{Account, AccountId, AccountRepository, AccountRole, NewAccount, PasswordHasher};
pub use auth::{Action, Authorizer, Principal, RoleAuthorizer};
pub use availability::{
    check_availability, Availability, AvailabilityChecker, Debouncer, FieldCandidate, FieldKind,
    FieldState, FieldTracker, UniquenessLookup,
};
pub use error::DomainError;
pub use registration::{
    CreateAccountRequest, RegistrationError, RegistrationSession, SignupField, SignupStep,
};
pub use validation::{
    normalize_email, password_requirements_list, username_requirements_list, validate_email,
    validate_password, validate_username, PasswordRules, PasswordStrength, PasswordVerdict,
    UsernameRules, ValidationRules, ValidationVerdict,
};
