use std::time::Duration;

use serde::Deserialize;

use crate::domain::validation::ValidationRules;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub validation: ValidationRules,
    pub availability: AvailabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Availability checking settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// Quiet period after the last edit before a lookup is issued
    pub debounce_ms: u64,
    /// Usernames the in-memory store starts with
    pub taken_usernames: Vec<String>,
    /// Emails the in-memory store starts with
    pub taken_emails: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            taken_usernames: Vec::new(),
            taken_emails: Vec::new(),
        }
    }
}

impl AvailabilityConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("availability.taken_usernames")
                    .with_list_parse_key("availability.taken_emails")
                    .with_list_parse_key("validation.username.forbidden_words")
                    .with_list_parse_key("validation.password.forbidden_patterns")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.availability.debounce(), Duration::from_millis(500));
        assert_eq!(config.validation.username.min_length, 3);
        assert!(config.availability.taken_usernames.is_empty());
    }

    #[test]
    fn test_partial_sources_merge_over_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("availability.debounce_ms", 250)
            .unwrap()
            .set_override("validation.username.max_length", 12)
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.availability.debounce_ms, 250);
        assert_eq!(config.validation.username.max_length, 12);
        assert_eq!(config.validation.username.min_length, 3);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
    }
}
