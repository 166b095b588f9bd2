//! Authorization decisions
//!
//! Callers resolve their transport credentials into a verified
//! [`Principal`] before reaching the core. The core only asks an
//! [`Authorizer`] whether that principal may perform an action.

mod authorizer;
mod principal;

pub use authorizer::{Action, Authorizer, RoleAuthorizer};
pub use principal::Principal;
