mod app_config;

pub use app_config::{AppConfig, AvailabilityConfig, LogFormat, LoggingConfig};
