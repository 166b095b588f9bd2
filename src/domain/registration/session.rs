//! Registration session
//!
//! One session per signup attempt. The session owns the candidate values
//! and the latest results for them, and gates progress through the
//! multi-step form.

use serde::{Deserialize, Serialize};

use crate::domain::availability::Availability;
use crate::domain::validation::{validate_password, PasswordRules, PasswordVerdict};
use crate::domain::DomainError;

/// Steps of the signup form, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupStep {
    #[default]
    Username,
    Email,
    Password,
    Review,
}

impl SignupStep {
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Username => Some(Self::Email),
            Self::Email => Some(Self::Password),
            Self::Password => Some(Self::Review),
            Self::Review => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Username => None,
            Self::Email => Some(Self::Username),
            Self::Password => Some(Self::Email),
            Self::Review => Some(Self::Password),
        }
    }
}

/// Input to the create-account gate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// State of one signup attempt
#[derive(Debug, Clone, Default)]
pub struct RegistrationSession {
    username: String,
    email: String,
    password: String,
    username_availability: Option<Availability>,
    email_availability: Option<Availability>,
    password_verdict: Option<PasswordVerdict>,
    step: SignupStep,
}

impl RegistrationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    pub fn username_availability(&self) -> Option<&Availability> {
        self.username_availability.as_ref()
    }

    pub fn email_availability(&self) -> Option<&Availability> {
        self.email_availability.as_ref()
    }

    pub fn password_verdict(&self) -> Option<&PasswordVerdict> {
        self.password_verdict.as_ref()
    }

    /// Replace the username; any earlier availability result is dropped
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.username_availability = None;
    }

    /// Replace the email; any earlier availability result is dropped
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.email_availability = None;
    }

    /// Replace the password and score it
    pub fn set_password(&mut self, password: impl Into<String>, rules: &PasswordRules) {
        self.password = password.into();
        self.password_verdict = Some(validate_password(&self.password, rules));
    }

    /// Store an availability result for `username`
    ///
    /// Results for a value that is no longer the current username are
    /// ignored. Returns whether the result was applied.
    pub fn record_username(&mut self, username: &str, availability: Availability) -> bool {
        if username != self.username {
            return false;
        }
        self.username_availability = Some(availability);
        true
    }

    /// Store an availability result for `email`; stale results are ignored
    pub fn record_email(&mut self, email: &str, availability: Availability) -> bool {
        if email != self.email {
            return false;
        }
        self.email_availability = Some(availability);
        true
    }

    fn username_ready(&self) -> bool {
        !self.username.is_empty()
            && self
                .username_availability
                .as_ref()
                .is_some_and(Availability::is_available)
    }

    fn email_ready(&self) -> bool {
        !self.email.is_empty()
            && self
                .email_availability
                .as_ref()
                .is_some_and(Availability::is_available)
    }

    fn password_ready(&self) -> bool {
        !self.password.is_empty()
            && self
                .password_verdict
                .as_ref()
                .is_some_and(PasswordVerdict::is_valid)
    }

    /// Whether every field is filled in and confirmed
    ///
    /// Username and email must be available; the password must be valid.
    pub fn is_complete(&self) -> bool {
        self.username_ready() && self.email_ready() && self.password_ready()
    }

    /// Move to the next step once the current step's field is ready
    pub fn advance(&mut self) -> Result<SignupStep, DomainError> {
        let ready = match self.step {
            SignupStep::Username => self.username_ready(),
            SignupStep::Email => self.email_ready(),
            SignupStep::Password => self.password_ready(),
            SignupStep::Review => {
                return Err(DomainError::validation(
                    "Registration is already at the final step",
                ));
            }
        };

        if !ready {
            return Err(DomainError::validation(format!(
                "Cannot leave the {:?} step until it is complete",
                self.step
            )));
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one step; stays on the first step
    pub fn back(&mut self) -> SignupStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Build the create-account input once the session is complete
    pub fn to_request(&self) -> Option<CreateAccountRequest> {
        if !self.is_complete() {
            return None;
        }

        Some(CreateAccountRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ValidationVerdict;

    fn complete_session() -> RegistrationSession {
        let mut session = RegistrationSession::new();
        session.set_username("freshname");
        session.record_username("freshname", Availability::Available);
        session.set_email("fresh@example.com");
        session.record_email("fresh@example.com", Availability::Available);
        session.set_password("Tr0ub4dor&3", &PasswordRules::default());
        session
    }

    #[test]
    fn test_complete_session() {
        let session = complete_session();
        assert!(session.is_complete());

        let request = session.to_request().unwrap();
        assert_eq!(request.username, "freshname");
        assert_eq!(request.password, request.confirm_password);
    }

    #[test]
    fn test_empty_session_is_incomplete() {
        let session = RegistrationSession::new();
        assert!(!session.is_complete());
        assert!(session.to_request().is_none());
    }

    #[test]
    fn test_taken_or_failed_lookup_blocks_completion() {
        let mut session = complete_session();
        session.record_email("fresh@example.com", Availability::Taken);
        assert!(!session.is_complete());

        session.record_email(
            "fresh@example.com",
            Availability::LookupFailed {
                reason: "down".into(),
            },
        );
        assert!(!session.is_complete());
    }

    #[test]
    fn test_weak_password_blocks_completion() {
        let mut session = complete_session();
        session.set_password("Password1!", &PasswordRules::default());
        assert!(!session.is_complete());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut session = RegistrationSession::new();
        session.set_username("first");
        session.set_username("second");

        assert!(!session.record_username("first", Availability::Available));
        assert!(session.username_availability().is_none());

        assert!(session.record_username("second", Availability::Taken));
        assert_eq!(session.username_availability(), Some(&Availability::Taken));
    }

    #[test]
    fn test_changing_value_clears_result() {
        let mut session = complete_session();
        session.set_username("othername");
        assert!(session.username_availability().is_none());
        assert!(!session.is_complete());
    }

    #[test]
    fn test_step_gating() {
        let mut session = RegistrationSession::new();
        assert_eq!(session.step(), SignupStep::Username);

        session.set_username("admin");
        session.record_username(
            "admin",
            Availability::Invalid(ValidationVerdict::from_findings(
                vec!["Username cannot contain \"admin\"".into()],
                vec![],
            )),
        );
        assert!(session.advance().is_err());
        assert_eq!(session.step(), SignupStep::Username);

        session.set_username("freshname");
        session.record_username("freshname", Availability::Available);
        assert_eq!(session.advance().unwrap(), SignupStep::Email);

        session.set_email("fresh@example.com");
        session.record_email("fresh@example.com", Availability::Available);
        assert_eq!(session.advance().unwrap(), SignupStep::Password);

        session.set_password("Tr0ub4dor&3", &PasswordRules::default());
        assert_eq!(session.advance().unwrap(), SignupStep::Review);
        assert!(session.advance().is_err());

        assert_eq!(session.back(), SignupStep::Password);
    }

    #[test]
    fn test_back_stays_on_first_step() {
        let mut session = RegistrationSession::new();
        assert_eq!(session.back(), SignupStep::Username);
    }
}
