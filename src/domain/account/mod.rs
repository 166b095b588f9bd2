//! Account domain
//!
//! Registered accounts, the repository contract used for uniqueness
//! lookups and commits, and the password hashing capability.

mod entity;
mod password;
mod repository;

pub use entity::{Account, AccountId, AccountRole, NewAccount};
pub use password::PasswordHasher;
pub use repository::AccountRepository;

#[cfg(test)]
pub use password::MockPasswordHasher;
#[cfg(test)]
pub use repository::MockAccountRepository;
