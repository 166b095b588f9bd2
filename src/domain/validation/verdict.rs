//! Validation verdicts
//!
//! Verdicts are plain values built once per validation call. Rule
//! violations are reported through `errors`, never through `Result`.

use serde::{Deserialize, Serialize};

/// Structured result of validating a single candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    is_valid: bool,
    /// Human-readable reasons, in rule evaluation order
    errors: Vec<String>,
    /// Non-fatal hints; absent when there is nothing to suggest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suggestions: Option<Vec<String>>,
}

impl ValidationVerdict {
    /// Build a verdict from collected findings; valid iff no errors
    pub(crate) fn from_findings(errors: Vec<String>, suggestions: Vec<String>) -> Self {
        Self::new(errors.is_empty(), errors, suggestions)
    }

    pub(crate) fn new(is_valid: bool, errors: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            is_valid,
            errors,
            suggestions: if suggestions.is_empty() {
                None
            } else {
                Some(suggestions)
            },
        }
    }

    /// Verdict for an empty candidate: exactly one error, no suggestions
    pub(crate) fn required(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
            suggestions: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn suggestions(&self) -> Option<&[String]> {
        self.suggestions.as_deref()
    }

    /// Check whether any error message contains the given fragment
    pub fn has_error_containing(&self, fragment: &str) -> bool {
        self.errors.iter().any(|e| e.contains(fragment))
    }
}

/// Password strength classification derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Classify an unrounded score: below 40 weak, below 70 medium
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            Self::Weak
        } else if score < 70.0 {
            Self::Medium
        } else {
            Self::Strong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Password verdict: a validation verdict plus strength scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordVerdict {
    #[serde(flatten)]
    verdict: ValidationVerdict,
    strength: PasswordStrength,
    /// Always within 0..=100
    score: u8,
}

impl PasswordVerdict {
    /// Build from the clamped raw score; only the reported score is rounded
    pub(crate) fn new(verdict: ValidationVerdict, raw_score: f64) -> Self {
        let raw_score = raw_score.clamp(0.0, 100.0);

        Self {
            verdict,
            strength: PasswordStrength::from_score(raw_score),
            score: raw_score.round() as u8,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }

    pub fn errors(&self) -> &[String] {
        self.verdict.errors()
    }

    pub fn strength(&self) -> PasswordStrength {
        self.strength
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn as_verdict(&self) -> &ValidationVerdict {
        &self.verdict
    }
}
