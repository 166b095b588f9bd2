//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::normalize_email;
use crate::domain::DomainError;

/// Account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|e| DomainError::validation(format!("Invalid account ID '{}': {}", id, e)))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of an account holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    #[default]
    User,
    Admin,
}

impl AccountRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Values accepted by the store when creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    username: String,
    /// Stored lowercase
    email: String,
    /// Never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    role: AccountRole,
    is_active: bool,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active, unverified account with the user role
    pub fn new(new: NewAccount) -> Self {
        let now = Utc::now();

        Self {
            id: AccountId::generate(),
            username: new.username,
            email: normalize_email(&new.email),
            password_hash: new.password_hash,
            role: AccountRole::User,
            is_active: true,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> AccountRole {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_role(&mut self, role: AccountRole) {
        self.role = role;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(username: &str, email: &str) -> Account {
        Account::new(NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hashed_password".to_string(),
        })
    }

    #[test]
    fn test_account_creation_defaults() {
        let account = new_account("alice", "Alice@Example.com");

        assert_eq!(account.username(), "alice");
        assert_eq!(account.email(), "alice@example.com");
        assert_eq!(account.role(), AccountRole::User);
        assert!(account.is_active());
        assert!(!account.email_verified());
        assert_eq!(account.created_at(), account.updated_at());
    }

    #[test]
    fn test_account_id_parse() {
        let id = AccountId::generate();
        assert_eq!(AccountId::parse(&id.to_string()).unwrap(), id);
        assert!(AccountId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_set_role_touches() {
        let mut account = new_account("alice", "alice@example.com");
        let before = account.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(5));
        account.set_role(AccountRole::Admin);

        assert!(account.role().is_admin());
        assert!(account.updated_at() > before);
    }

    #[test]
    fn test_serialization_excludes_password_hash() {
        let account = new_account("alice", "alice@example.com");
        let json = serde_json::to_string(&account).unwrap();

        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("\"role\":\"user\""));
    }
}
