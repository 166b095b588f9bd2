//! Username validation

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::verdict::ValidationVerdict;

static SEQUENTIAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)123|abc|qwe").unwrap());

const CONSECUTIVE_SPECIALS: [&str; 4] = ["__", "--", "_-", "-_"];

/// Configurable username rules
///
/// Every field has a default, so a partially specified configuration
/// merges over the defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsernameRules {
    pub min_length: usize,
    pub max_length: usize,
    pub allow_numbers: bool,
    pub allow_underscores: bool,
    pub allow_hyphens: bool,
    pub require_letters: bool,
    /// Matched as substrings. Note that broad entries such as "user" and
    /// "test" also reject names like "newuser42"; pending product review.
    pub forbidden_words: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for UsernameRules {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 20,
            allow_numbers: true,
            allow_underscores: true,
            allow_hyphens: true,
            require_letters: true,
            forbidden_words: [
                "admin",
                "root",
                "user",
                "test",
                "null",
                "undefined",
                "system",
                "api",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            case_sensitive: false,
        }
    }
}

impl UsernameRules {
    fn allows(&self, c: char) -> bool {
        c.is_ascii_alphabetic()
            || (self.allow_numbers && c.is_ascii_digit())
            || (self.allow_underscores && c == '_')
            || (self.allow_hyphens && c == '-')
    }
}

/// Validate a username against the given rules
///
/// All rules are evaluated and every violation is reported, except for an
/// empty candidate which short-circuits with a single error.
pub fn validate_username(username: &str, rules: &UsernameRules) -> ValidationVerdict {
    if username.is_empty() {
        return ValidationVerdict::required("Username is required");
    }

    let mut errors = Vec::new();
    let mut suggestions = Vec::new();
    let length = username.chars().count();

    if length < rules.min_length {
        errors.push(format!(
            "Username must be at least {} characters long",
            rules.min_length
        ));
    }

    if length > rules.max_length {
        errors.push(format!(
            "Username must not exceed {} characters",
            rules.max_length
        ));
    }

    let has_letters = username.chars().any(|c| c.is_ascii_alphabetic());
    let has_numbers = username.chars().any(|c| c.is_ascii_digit());
    let has_underscores = username.contains('_');
    let has_hyphens = username.contains('-');

    if rules.require_letters && !has_letters {
        errors.push("Username must contain at least one letter".to_string());
    }

    if !username.chars().all(|c| rules.allows(c)) {
        let mut disallowed = Vec::new();
        if !rules.allow_numbers && has_numbers {
            disallowed.push("numbers");
        }
        if !rules.allow_underscores && has_underscores {
            disallowed.push("underscores");
        }
        if !rules.allow_hyphens && has_hyphens {
            disallowed.push("hyphens");
        }

        if disallowed.is_empty() {
            errors.push("Username contains invalid characters".to_string());
        } else {
            errors.push(format!("Username cannot contain {}", disallowed.join(", ")));
        }
    }

    if username.starts_with(['_', '-']) {
        errors.push("Username cannot start with underscore or hyphen".to_string());
    }

    if username.ends_with(['_', '-']) {
        errors.push("Username cannot end with underscore or hyphen".to_string());
    }

    if CONSECUTIVE_SPECIALS.iter().any(|p| username.contains(p)) {
        errors.push("Username cannot contain consecutive special characters".to_string());
    }

    let haystack = if rules.case_sensitive {
        username.to_string()
    } else {
        username.to_lowercase()
    };

    for word in rules.forbidden_words.iter().filter(|w| !w.is_empty()) {
        let needle = if rules.case_sensitive {
            word.clone()
        } else {
            word.to_lowercase()
        };

        if haystack.contains(&needle) {
            errors.push(format!("Username cannot contain \"{}\"", needle));
        }
    }

    if username.chars().all(|c| c.is_ascii_digit()) {
        errors.push("Username cannot be only numbers".to_string());
        suggestions.push("Try adding letters to your username".to_string());
    }

    if SEQUENTIAL_PATTERN.is_match(username) {
        errors.push("Username should not contain sequential patterns".to_string());
    }

    if !errors.is_empty() {
        if length < rules.min_length {
            suggestions.push(format!(
                "Add {} more characters",
                rules.min_length - length
            ));
        }

        if has_letters && has_numbers {
            let n: u32 = rand::thread_rng().gen_range(0..99);
            suggestions.push(format!("Try \"{}{}\"", username, n));
        }
    }

    ValidationVerdict::from_findings(errors, suggestions)
}

/// Describe the username rules as a user-facing checklist
pub fn username_requirements_list(rules: &UsernameRules) -> Vec<String> {
    let mut list = vec![format!(
        "{}-{} characters long",
        rules.min_length, rules.max_length
    )];

    if rules.require_letters {
        list.push("Must contain at least one letter".to_string());
    }

    let mut allowed = vec!["letters"];
    if rules.allow_numbers {
        allowed.push("numbers");
    }
    if rules.allow_underscores {
        allowed.push("underscores");
    }
    if rules.allow_hyphens {
        allowed.push("hyphens");
    }

    list.push(format!("Can contain: {}", allowed.join(", ")));
    list.push("Cannot start or end with special characters".to_string());

    list
}
