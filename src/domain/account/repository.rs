//! Account repository trait

use async_trait::async_trait;

use super::entity::{Account, AccountId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for account persistence
///
/// Implementations must enforce username and email uniqueness inside
/// `create` and report collisions as `DomainError::Conflict`. The
/// availability check that precedes `create` is advisory only: two
/// sessions can both pass it before either commits.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get an account by its ID
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Get an account by its exact username
    async fn get_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Get an account by its normalized (lowercase) email
    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Replace an existing account
    async fn update(&self, account: &Account) -> Result<Account, DomainError>;

    /// Delete an account, returning whether it existed
    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError>;

    /// List all accounts
    async fn list(&self) -> Result<Vec<Account>, DomainError>;

    /// Check if a username is already registered
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }

    /// Check if a normalized email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
