//! Email validation

use once_cell::sync::Lazy;
use regex::Regex;

use super::verdict::ValidationVerdict;

/// Maximum total length of an address
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of the part before `@`
pub const MAX_LOCAL_PART_LENGTH: usize = 64;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Typo fragments of major providers and the domain they most likely meant
const PROVIDER_TYPOS: [(&[&str], &str); 3] = [
    (&["gmial", "gmai"], "gmail.com"),
    (&["yahooo", "yaho"], "yahoo.com"),
    (&["hotmial", "hotmai"], "hotmail.com"),
];

/// Markers of throwaway mailbox services
const DISPOSABLE_MARKERS: [&str; 4] = ["10minutemail", "tempmail", "guerrillamail", "mailinator"];

/// Suggest a provider domain for a likely typo
///
/// Only the first matching provider is suggested. Fragments such as
/// "gmai" also match the canonical domain, which then gets the hint too.
fn typo_suggestion(domain_lower: &str) -> Option<String> {
    PROVIDER_TYPOS
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| domain_lower.contains(f)))
        .map(|(_, intended)| format!("Did you mean {}?", intended))
}

/// Validate an email address
///
/// Format, length, domain shape and disposable-provider checks are all
/// evaluated. Typo hints are returned as suggestions and never make the
/// address invalid.
pub fn validate_email(email: &str) -> ValidationVerdict {
    if email.is_empty() {
        return ValidationVerdict::required("Email is required");
    }

    let mut errors = Vec::new();
    let mut suggestions = Vec::new();

    if !EMAIL_PATTERN.is_match(email) {
        errors.push("Please enter a valid email address".to_string());
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        errors.push(format!(
            "Email address is too long (maximum {} characters)",
            MAX_EMAIL_LENGTH
        ));
    }

    let mut parts = email.split('@');
    let local_part = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local_part.chars().count() > MAX_LOCAL_PART_LENGTH {
        errors.push(format!(
            "Email local part is too long (maximum {} characters)",
            MAX_LOCAL_PART_LENGTH
        ));
    }

    if !domain.is_empty() {
        if domain.chars().count() < 2 {
            errors.push("Domain must be at least 2 characters long".to_string());
        }

        if domain.starts_with('.') || domain.ends_with('.') {
            errors.push("Domain cannot start or end with a dot".to_string());
        }

        if domain.contains("..") {
            errors.push("Domain cannot contain consecutive dots".to_string());
        }

        if let Some(suggestion) = typo_suggestion(&domain.to_lowercase()) {
            suggestions.push(suggestion);
        }
    }

    if email.contains("..") {
        errors.push("Email cannot contain consecutive dots".to_string());
    }

    if email.starts_with('.') || email.ends_with('.') {
        errors.push("Email cannot start or end with a dot".to_string());
    }

    let domain_lower = domain.to_lowercase();
    if !domain.is_empty() && DISPOSABLE_MARKERS.iter().any(|m| domain_lower.contains(m)) {
        errors.push("Temporary email addresses are not allowed".to_string());
    }

    ValidationVerdict::from_findings(errors, suggestions)
}

/// Normalize an email for storage and uniqueness lookups
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}
