//! In-memory account repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::validation::normalize_email;
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct AccountStore {
    accounts: HashMap<AccountId, Account>,
    /// username -> account ID
    usernames: HashMap<String, AccountId>,
    /// lowercase email -> account ID
    emails: HashMap<String, AccountId>,
}

impl AccountStore {
    fn insert(&mut self, account: Account) {
        let id = *account.id();
        self.usernames.insert(account.username().to_string(), id);
        self.emails.insert(account.email().to_string(), id);
        self.accounts.insert(id, account);
    }
}

/// In-memory implementation of AccountRepository
///
/// All three maps sit behind one lock, so the uniqueness checks in
/// `create` and the insert are a single atomic step.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    store: Arc<RwLock<AccountStore>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial accounts
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let mut store = AccountStore::default();
        for account in accounts {
            store.insert(account);
        }

        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let store = self.store.read().await;
        Ok(store.accounts.get(id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .usernames
            .get(username)
            .and_then(|id| store.accounts.get(id))
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .emails
            .get(&normalize_email(email))
            .and_then(|id| store.accounts.get(id))
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut store = self.store.write().await;

        if store.accounts.contains_key(account.id()) {
            return Err(DomainError::conflict(format!(
                "Account with ID '{}' already exists",
                account.id()
            )));
        }

        if store.usernames.contains_key(account.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                account.username()
            )));
        }

        if store.emails.contains_key(account.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                account.email()
            )));
        }

        store.insert(account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let mut store = self.store.write().await;

        let Some(existing) = store.accounts.get(account.id()) else {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                account.id()
            )));
        };

        let old_username = existing.username().to_string();
        let old_email = existing.email().to_string();

        if old_username != account.username() && store.usernames.contains_key(account.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                account.username()
            )));
        }

        if old_email != account.email() && store.emails.contains_key(account.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                account.email()
            )));
        }

        store.usernames.remove(&old_username);
        store.emails.remove(&old_email);
        store.insert(account.clone());

        Ok(account.clone())
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;

        if let Some(account) = store.accounts.remove(id) {
            store.usernames.remove(account.username());
            store.emails.remove(account.email());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        let store = self.store.read().await;

        let mut accounts: Vec<Account> = store.accounts.values().cloned().collect();
        accounts.sort_by_key(|a| a.created_at());

        Ok(accounts)
    }
}
