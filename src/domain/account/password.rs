//! Password hashing capability
//!
//! The signup core never hashes passwords itself; the hasher is supplied
//! by whoever wires the service together.

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Turns a validated plaintext password into a storable hash
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, DomainError>;
}
