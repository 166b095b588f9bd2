//! Account administration behind an authorization check

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::account::{Account, AccountId, AccountRepository, AccountRole};
use crate::domain::auth::{Action, Authorizer, Principal};
use crate::domain::validation::normalize_email;
use crate::domain::DomainError;

/// Account management for authenticated callers
#[derive(Debug)]
pub struct AccountAdminService<R: AccountRepository, A: Authorizer> {
    repository: Arc<R>,
    authorizer: Arc<A>,
}

impl<R: AccountRepository, A: Authorizer> AccountAdminService<R, A> {
    pub fn new(repository: Arc<R>, authorizer: Arc<A>) -> Self {
        Self {
            repository,
            authorizer,
        }
    }

    fn authorize(&self, principal: &Principal, action: &Action) -> Result<(), DomainError> {
        self.authorizer.authorize(principal, action).inspect_err(|e| {
            warn!(
                principal = %principal.identifier(),
                action = action.name(),
                error = %e,
                "Authorization denied"
            );
        })
    }

    /// List all accounts
    pub async fn list(&self, principal: &Principal) -> Result<Vec<Account>, DomainError> {
        self.authorize(principal, &Action::ListAccounts)?;
        self.repository.list().await
    }

    /// Get an account by ID
    pub async fn get(
        &self,
        principal: &Principal,
        id: &str,
    ) -> Result<Option<Account>, DomainError> {
        self.authorize(principal, &Action::ViewAccount)?;

        let id = AccountId::parse(id)?;
        self.repository.get(&id).await
    }

    /// Get an account by email; callers may always look up their own
    pub async fn get_by_email(
        &self,
        principal: &Principal,
        email: &str,
    ) -> Result<Option<Account>, DomainError> {
        let email = normalize_email(email);
        self.authorize(
            principal,
            &Action::ViewAccountByEmail {
                email: email.clone(),
            },
        )?;

        self.repository.get_by_email(&email).await
    }

    /// Delete an account
    pub async fn delete(&self, principal: &Principal, id: &str) -> Result<bool, DomainError> {
        self.authorize(principal, &Action::DeleteAccount)?;

        let id = AccountId::parse(id)?;
        let deleted = self.repository.delete(&id).await?;

        if deleted {
            info!(account_id = %id, by = %principal.identifier(), "Account deleted");
        }

        Ok(deleted)
    }

    /// Change an account's role
    pub async fn set_role(
        &self,
        principal: &Principal,
        id: &str,
        role: AccountRole,
    ) -> Result<Account, DomainError> {
        self.authorize(principal, &Action::ChangeRole)?;

        let id = AccountId::parse(id)?;
        let mut account = self
            .repository
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Account '{}' not found", id)))?;

        account.set_role(role);
        let account = self.repository.update(&account).await?;

        info!(account_id = %id, role = ?role, by = %principal.identifier(), "Account role changed");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{MockAccountRepository, NewAccount};
    use crate::domain::auth::RoleAuthorizer;
    use crate::infrastructure::account::InMemoryAccountRepository;

    fn account(username: &str, email: &str) -> Account {
        Account::new(NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hashed".to_string(),
        })
    }

    fn admin() -> Principal {
        Principal::new(AccountId::generate(), "root@example.com", AccountRole::Admin)
    }

    fn member(email: &str) -> Principal {
        Principal::new(AccountId::generate(), email, AccountRole::User)
    }

    fn service(
        accounts: Vec<Account>,
    ) -> AccountAdminService<InMemoryAccountRepository, RoleAuthorizer> {
        AccountAdminService::new(
            Arc::new(InMemoryAccountRepository::with_accounts(accounts)),
            Arc::new(RoleAuthorizer::new()),
        )
    }

    #[tokio::test]
    async fn test_admin_can_list_and_get() {
        let alice = account("alice", "alice@example.com");
        let service = service(vec![alice.clone(), account("bob", "bob@example.com")]);

        assert_eq!(service.list(&admin()).await.unwrap().len(), 2);

        let found = service
            .get(&admin(), &alice.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.username(), "alice");
    }

    #[tokio::test]
    async fn test_member_cannot_list_or_delete() {
        let alice = account("alice", "alice@example.com");
        let service = service(vec![alice.clone()]);
        let caller = member("alice@example.com");

        let result = service.list(&caller).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        let result = service.delete(&caller, &alice.id().to_string()).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
        assert_eq!(service.list(&admin()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_member_can_only_view_own_email() {
        let service = service(vec![
            account("alice", "alice@example.com"),
            account("bob", "bob@example.com"),
        ]);
        let caller = member("alice@example.com");

        let own = service
            .get_by_email(&caller, "Alice@Example.com")
            .await
            .unwrap();
        assert_eq!(own.unwrap().username(), "alice");

        let other = service.get_by_email(&caller, "bob@example.com").await;
        assert!(matches!(other, Err(DomainError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_denied_request_never_reaches_store() {
        let mut repo = MockAccountRepository::new();
        repo.expect_list().times(0);

        let service = AccountAdminService::new(Arc::new(repo), Arc::new(RoleAuthorizer::new()));
        assert!(service.list(&member("me@example.com")).await.is_err());
    }

    #[tokio::test]
    async fn test_set_role_and_delete() {
        let alice = account("alice", "alice@example.com");
        let id = alice.id().to_string();
        let service = service(vec![alice]);

        let updated = service
            .set_role(&admin(), &id, AccountRole::Admin)
            .await
            .unwrap();
        assert!(updated.role().is_admin());

        assert!(service.delete(&admin(), &id).await.unwrap());
        assert!(service.get(&admin(), &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_role_missing_account() {
        let service = service(vec![]);
        let result = service
            .set_role(&admin(), &AccountId::generate().to_string(), AccountRole::Admin)
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let service = service(vec![]);
        let result = service.get(&admin(), "not-a-uuid").await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
