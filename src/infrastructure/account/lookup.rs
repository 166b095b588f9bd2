//! Uniqueness lookup implementations

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::account::AccountRepository;
use crate::domain::availability::{FieldKind, UniquenessLookup};
use crate::domain::validation::normalize_email;
use crate::domain::DomainError;

/// Answers availability lookups from the account store
#[derive(Debug)]
pub struct RepositoryLookup<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> RepositoryLookup<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: AccountRepository> UniquenessLookup for RepositoryLookup<R> {
    async fn exists(&self, kind: FieldKind, value: &str) -> Result<bool, DomainError> {
        let exists = match kind {
            FieldKind::Username => self.repository.username_exists(value).await,
            FieldKind::Email => self.repository.email_exists(value).await,
        };

        exists.map_err(|e| DomainError::lookup(format!("{} lookup failed: {}", kind, e)))
    }
}

/// Fixed set of registered values, used when no account store is wired in
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    usernames: HashSet<String>,
    emails: HashSet<String>,
}

impl StaticLookup {
    pub fn new<U, E>(usernames: U, emails: E) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            usernames: usernames.into_iter().map(Into::into).collect(),
            emails: emails
                .into_iter()
                .map(|e| normalize_email(e.as_ref()))
                .collect(),
        }
    }
}

#[async_trait]
impl UniquenessLookup for StaticLookup {
    async fn exists(&self, kind: FieldKind, value: &str) -> Result<bool, DomainError> {
        Ok(match kind {
            FieldKind::Username => self.usernames.contains(value),
            FieldKind::Email => self.emails.contains(&normalize_email(value)),
        })
    }
}
