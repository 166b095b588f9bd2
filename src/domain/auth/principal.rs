//! Verified caller identity

use serde::{Deserialize, Serialize};

use crate::domain::account::{Account, AccountId, AccountRole};
use crate::domain::validation::normalize_email;

/// Claims of an already authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    account_id: AccountId,
    email: String,
    role: AccountRole,
}

impl Principal {
    pub fn new(account_id: AccountId, email: impl Into<String>, role: AccountRole) -> Self {
        Self {
            account_id,
            email: normalize_email(&email.into()),
            role,
        }
    }

    /// Principal acting on behalf of a stored account
    pub fn for_account(account: &Account) -> Self {
        Self::new(*account.id(), account.email(), account.role())
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> AccountRole {
        self.role
    }

    /// Identifier used in logs
    pub fn identifier(&self) -> String {
        format!("account:{}", self.account_id)
    }
}
