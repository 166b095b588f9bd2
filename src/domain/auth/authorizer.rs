//! Authorizer capability and the default role-based policy

use super::principal::Principal;
use crate::domain::DomainError;

/// Operations that require an authorization decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ListAccounts,
    ViewAccount,
    /// Look up an account by email; `email` is normalized
    ViewAccountByEmail { email: String },
    DeleteAccount,
    ChangeRole,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListAccounts => "list_accounts",
            Self::ViewAccount => "view_account",
            Self::ViewAccountByEmail { .. } => "view_account_by_email",
            Self::DeleteAccount => "delete_account",
            Self::ChangeRole => "change_role",
        }
    }
}

/// Decides whether a principal may perform an action
pub trait Authorizer: Send + Sync {
    fn authorize(&self, principal: &Principal, action: &Action) -> Result<(), DomainError>;
}

/// Admins may do everything; other principals may only look up their
/// own account by email
#[derive(Debug, Clone, Default)]
pub struct RoleAuthorizer;

impl RoleAuthorizer {
    pub fn new() -> Self {
        Self
    }
}

impl Authorizer for RoleAuthorizer {
    fn authorize(&self, principal: &Principal, action: &Action) -> Result<(), DomainError> {
        if principal.role().is_admin() {
            return Ok(());
        }

        match action {
            Action::ViewAccountByEmail { email } if email == principal.email() => Ok(()),
            Action::ViewAccountByEmail { .. } => Err(DomainError::forbidden("Access denied")),
            _ => Err(DomainError::forbidden("Admin access required")),
        }
    }
}
