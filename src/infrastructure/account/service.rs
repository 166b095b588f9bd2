//! Signup service: the create-account gate

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::account::{Account, AccountRepository, NewAccount, PasswordHasher};
use crate::domain::availability::FieldKind;
use crate::domain::registration::{CreateAccountRequest, RegistrationError, SignupField};
use crate::domain::validation::{
    normalize_email, validate_email, validate_password, validate_username, ValidationRules,
};

/// Creates accounts once every field has passed validation and uniqueness
#[derive(Debug)]
pub struct SignupService<R: AccountRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    rules: ValidationRules,
}

impl<R: AccountRepository, H: PasswordHasher> SignupService<R, H> {
    /// Create a new signup service
    pub fn new(repository: Arc<R>, hasher: Arc<H>, rules: ValidationRules) -> Self {
        Self {
            repository,
            hasher,
            rules,
        }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validate, check uniqueness, hash and store a new account
    ///
    /// The uniqueness check is advisory. A registration that commits
    /// between the check and the insert surfaces as
    /// [`RegistrationError::ConflictAtCommit`].
    pub async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<Account, RegistrationError> {
        if request.username.is_empty()
            || request.email.is_empty()
            || request.password.is_empty()
            || request.confirm_password.is_empty()
        {
            return Err(RegistrationError::MissingFields);
        }

        if request.password != request.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        let username = validate_username(&request.username, &self.rules.username);
        if !username.is_valid() {
            return Err(RegistrationError::Invalid {
                field: SignupField::Username,
                errors: username.errors().to_vec(),
            });
        }

        let email = validate_email(&request.email);
        if !email.is_valid() {
            return Err(RegistrationError::Invalid {
                field: SignupField::Email,
                errors: email.errors().to_vec(),
            });
        }

        let password = validate_password(&request.password, &self.rules.password);
        if !password.is_valid() {
            return Err(RegistrationError::Invalid {
                field: SignupField::Password,
                errors: password.errors().to_vec(),
            });
        }

        let normalized_email = normalize_email(&request.email);

        self.ensure_unique(FieldKind::Username, &request.username)
            .await?;
        self.ensure_unique(FieldKind::Email, &normalized_email)
            .await?;

        let password_hash = self
            .hasher
            .hash(&request.password)
            .map_err(RegistrationError::Storage)?;

        let account = Account::new(NewAccount {
            username: request.username.clone(),
            email: normalized_email,
            password_hash,
        });

        match self.repository.create(account).await {
            Ok(account) => {
                info!(
                    account_id = %account.id(),
                    username = %account.username(),
                    "Account created"
                );
                Ok(account)
            }
            Err(e) if e.is_conflict() => {
                let field = self.conflicting_field(&request.username).await;
                warn!(field = %field, error = %e, "Registration lost the race at commit");
                Err(RegistrationError::ConflictAtCommit { field })
            }
            Err(e) => Err(RegistrationError::Storage(e)),
        }
    }

    async fn ensure_unique(&self, kind: FieldKind, value: &str) -> Result<(), RegistrationError> {
        let field = SignupField::from(kind);
        let exists = match kind {
            FieldKind::Username => self.repository.username_exists(value).await,
            FieldKind::Email => self.repository.email_exists(value).await,
        };

        match exists {
            Ok(false) => Ok(()),
            Ok(true) => {
                debug!(field = %field, "Field already taken");
                Err(RegistrationError::Taken(field))
            }
            Err(source) => {
                warn!(field = %field, error = %source, "Uniqueness lookup failed");
                Err(RegistrationError::LookupFault { field, source })
            }
        }
    }

    /// Attribute a commit-time conflict to the username if it is now
    /// registered, otherwise to the email
    async fn conflicting_field(&self, username: &str) -> SignupField {
        match self.repository.username_exists(username).await {
            Ok(true) => SignupField::Username,
            _ => SignupField::Email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{MockAccountRepository, MockPasswordHasher};
    use crate::domain::DomainError;
    use crate::infrastructure::account::InMemoryAccountRepository;

    fn request(username: &str, email: &str, password: &str) -> CreateAccountRequest {
        CreateAccountRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        }
    }

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|p| Ok(format!("hashed:{}", p.len())));
        hasher
    }

    fn service<R: AccountRepository>(repo: R) -> SignupService<R, MockPasswordHasher> {
        SignupService::new(Arc::new(repo), Arc::new(hasher()), ValidationRules::default())
    }

    #[tokio::test]
    async fn test_create_account() {
        let service = service(InMemoryAccountRepository::new());

        let account = service
            .create_account(request("freshname", "Fresh@Example.com", "Tr0ub4dor&3"))
            .await
            .unwrap();

        assert_eq!(account.username(), "freshname");
        assert_eq!(account.email(), "fresh@example.com");
        assert_eq!(account.password_hash(), "hashed:11");
        assert!(!account.role().is_admin());
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let service = service(InMemoryAccountRepository::new());

        let mut req = request("freshname", "fresh@example.com", "Tr0ub4dor&3");
        req.confirm_password.clear();

        let result = service.create_account(req).await;
        assert!(matches!(result, Err(RegistrationError::MissingFields)));
    }

    #[tokio::test]
    async fn test_password_mismatch() {
        let service = service(InMemoryAccountRepository::new());

        let mut req = request("freshname", "fresh@example.com", "Tr0ub4dor&3");
        req.confirm_password = "Tr0ub4dor&4".to_string();

        let result = service.create_account(req).await;
        assert!(matches!(result, Err(RegistrationError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_invalid_fields_report_rule_errors() {
        let service = service(InMemoryAccountRepository::new());

        let err = service
            .create_account(request("admin123", "fresh@example.com", "Tr0ub4dor&3"))
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some(SignupField::Username));
        assert!(err.messages().iter().any(|m| m.contains("admin")));

        let err = service
            .create_account(request("freshname", "a@b", "Tr0ub4dor&3"))
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some(SignupField::Email));

        let err = service
            .create_account(request("freshname", "fresh@example.com", "Password1!"))
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some(SignupField::Password));
    }

    #[tokio::test]
    async fn test_taken_username_and_email() {
        let repo = InMemoryAccountRepository::new();
        let service = service(repo.clone());

        service
            .create_account(request("freshname", "fresh@example.com", "Tr0ub4dor&3"))
            .await
            .unwrap();

        let result = service
            .create_account(request("freshname", "other@example.com", "Tr0ub4dor&3"))
            .await;
        assert!(matches!(
            result,
            Err(RegistrationError::Taken(SignupField::Username))
        ));

        let result = service
            .create_account(request("othername", "FRESH@example.com", "Tr0ub4dor&3"))
            .await;
        assert!(matches!(
            result,
            Err(RegistrationError::Taken(SignupField::Email))
        ));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_treated_as_available() {
        let mut repo = MockAccountRepository::new();
        repo.expect_username_exists()
            .returning(|_| Err(DomainError::storage("connection reset")));
        repo.expect_create().times(0);

        let result = service(repo)
            .create_account(request("freshname", "fresh@example.com", "Tr0ub4dor&3"))
            .await;

        assert!(matches!(
            result,
            Err(RegistrationError::LookupFault {
                field: SignupField::Username,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_conflict_at_commit() {
        let mut repo = MockAccountRepository::new();
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create().times(1).returning(|account| {
            Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                account.email()
            )))
        });

        let result = service(repo)
            .create_account(request("freshname", "fresh@example.com", "Tr0ub4dor&3"))
            .await;

        assert!(matches!(
            result,
            Err(RegistrationError::ConflictAtCommit {
                field: SignupField::Email
            })
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_at_commit() {
        let mut repo = MockAccountRepository::new();
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create()
            .returning(|_| Err(DomainError::storage("disk full")));

        let result = service(repo)
            .create_account(request("freshname", "fresh@example.com", "Tr0ub4dor&3"))
            .await;

        assert!(matches!(result, Err(RegistrationError::Storage(_))));
    }

    #[tokio::test]
    async fn test_hash_failure_skips_commit() {
        let mut repo = MockAccountRepository::new();
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create().times(0);

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(DomainError::internal("hasher unavailable")));

        let service =
            SignupService::new(Arc::new(repo), Arc::new(hasher), ValidationRules::default());
        let result = service
            .create_account(request("freshname", "fresh@example.com", "Tr0ub4dor&3"))
            .await;

        assert!(matches!(result, Err(RegistrationError::Storage(_))));
    }
}
