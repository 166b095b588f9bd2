//! Password validation and strength scoring

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::verdict::{PasswordVerdict, ValidationVerdict};

/// Characters counted as the "special" class
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

static SEQUENTIAL_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"012|123|234|345|456|567|678|789|890").unwrap());

const MAX_LENGTH_BONUS: f64 = 25.0;
const LENGTH_BONUS_FACTOR: f64 = 15.0;
const CLASS_BONUS: f64 = 15.0;
const MIXED_CASE_BONUS: f64 = 5.0;
const VARIETY_BONUS_PER_CLASS: f64 = 5.0;
const FORBIDDEN_PATTERN_PENALTY: f64 = 20.0;
const REPEATED_CHARS_PENALTY: f64 = 15.0;
const SEQUENTIAL_DIGITS_PENALTY: f64 = 10.0;

/// Configurable password rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRules {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_numbers: bool,
    pub require_special_chars: bool,
    /// Case-insensitive substrings that are never allowed
    pub forbidden_patterns: Vec<String>,
    pub min_strength_score: u8,
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_numbers: true,
            require_special_chars: true,
            forbidden_patterns: ["password", "123456", "qwerty", "admin"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_strength_score: 60,
        }
    }
}

/// Which character classes appear in a candidate
#[derive(Debug, Clone, Copy, Default)]
struct CharacterClasses {
    upper: bool,
    lower: bool,
    digit: bool,
    special: bool,
}

impl CharacterClasses {
    fn of(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut classes, c| {
            classes.upper |= c.is_ascii_uppercase();
            classes.lower |= c.is_ascii_lowercase();
            classes.digit |= c.is_ascii_digit();
            classes.special |= SPECIAL_CHARACTERS.contains(c);
            classes
        })
    }

    fn count(&self) -> usize {
        [self.lower, self.upper, self.digit, self.special]
            .into_iter()
            .filter(|present| *present)
            .count()
    }
}

fn has_repeated_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Validate a password and compute its strength score
///
/// The score is accumulated from bonuses and penalties and clamped to
/// 0..=100. Strength and the `min_strength_score` check use the unrounded
/// value; only the reported score is rounded. A password is valid only
/// when no rule is violated and the score reaches `min_strength_score`.
pub fn validate_password(password: &str, rules: &PasswordRules) -> PasswordVerdict {
    let mut errors = Vec::new();
    let mut score = 0.0_f64;
    let length = password.chars().count();
    let classes = CharacterClasses::of(password);

    if length < rules.min_length {
        errors.push(format!(
            "Password must be at least {} characters long",
            rules.min_length
        ));
    } else {
        let bonus = length as f64 / rules.min_length as f64 * LENGTH_BONUS_FACTOR;
        score += bonus.min(MAX_LENGTH_BONUS);
    }

    if length > rules.max_length {
        errors.push(format!(
            "Password must not exceed {} characters",
            rules.max_length
        ));
    }

    let class_checks = [
        (
            rules.require_uppercase,
            classes.upper,
            "Password must contain at least one uppercase letter",
        ),
        (
            rules.require_lowercase,
            classes.lower,
            "Password must contain at least one lowercase letter",
        ),
        (
            rules.require_numbers,
            classes.digit,
            "Password must contain at least one number",
        ),
        (
            rules.require_special_chars,
            classes.special,
            "Password must contain at least one special character (!@#$%^&* etc.)",
        ),
    ];

    for (required, present, message) in class_checks {
        if present {
            score += CLASS_BONUS;
        } else if required {
            errors.push(message.to_string());
        }
    }

    let lowered = password.to_lowercase();
    for pattern in rules.forbidden_patterns.iter().filter(|p| !p.is_empty()) {
        if lowered.contains(&pattern.to_lowercase()) {
            errors.push(format!("Password cannot contain \"{}\"", pattern));
            score -= FORBIDDEN_PATTERN_PENALTY;
        }
    }

    if classes.upper && classes.lower {
        score += MIXED_CASE_BONUS;
    }

    score += classes.count() as f64 * VARIETY_BONUS_PER_CLASS;

    if has_repeated_run(password) {
        score -= REPEATED_CHARS_PENALTY;
        errors.push("Password should not contain repeated characters (e.g., \"aaa\")".to_string());
    }

    if SEQUENTIAL_DIGITS.is_match(password) {
        score -= SEQUENTIAL_DIGITS_PENALTY;
        errors.push("Password should not contain sequential patterns (e.g., \"123\")".to_string());
    }

    let score = score.clamp(0.0, 100.0);
    let is_valid = errors.is_empty() && score >= f64::from(rules.min_strength_score);

    PasswordVerdict::new(ValidationVerdict::new(is_valid, errors, Vec::new()), score)
}

/// Describe the enabled password rules as a user-facing checklist
///
/// Entries appear in a fixed order: length, uppercase, lowercase, number,
/// special character.
pub fn password_requirements_list(rules: &PasswordRules) -> Vec<String> {
    let mut list = Vec::new();

    if rules.min_length > 0 {
        list.push(format!("At least {} characters long", rules.min_length));
    }
    if rules.require_uppercase {
        list.push("At least one uppercase letter (A-Z)".to_string());
    }
    if rules.require_lowercase {
        list.push("At least one lowercase letter (a-z)".to_string());
    }
    if rules.require_numbers {
        list.push("At least one number (0-9)".to_string());
    }
    if rules.require_special_chars {
        list.push("At least one special character (!@#$%^&* etc.)".to_string());
    }

    list
}
