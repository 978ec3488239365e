pub mod config;

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
