use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid rate limit max_requests: {0}. Must be at least 1")]
    InvalidMaxRequests(u32),

    #[error("Invalid rate limit window_secs: {0}. Must be at least 1")]
    InvalidWindow(u64),

    #[error("Invalid classifier requests_per_second: {0}. Must be positive")]
    InvalidRequestsPerSecond(f64),

    #[error("Invalid classifier timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid cache ttl_secs: {0}. Must be at least 1")]
    InvalidCacheTtl(u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .taskwise/config.yaml (project config)
    /// 3. .taskwise/local.yaml (local overrides, optional)
    /// 4. Environment variables (TASKWISE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".taskwise/config.yaml"))
            .merge(Yaml::file(".taskwise/local.yaml"))
            .merge(Env::prefixed("TASKWISE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.rate_limit.max_requests == 0 {
            return Err(ConfigError::InvalidMaxRequests(config.rate_limit.max_requests));
        }
        if config.rate_limit.window_secs == 0 {
            return Err(ConfigError::InvalidWindow(config.rate_limit.window_secs));
        }

        if config.classifier.requests_per_second <= 0.0 {
            return Err(ConfigError::InvalidRequestsPerSecond(
                config.classifier.requests_per_second,
            ));
        }
        if config.classifier.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.classifier.timeout_secs));
        }

        if config.classifier.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(
                config.classifier.retry.max_retries,
            ));
        }
        if config.classifier.retry.initial_backoff_ms >= config.classifier.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.classifier.retry.initial_backoff_ms,
                config.classifier.retry.max_backoff_ms,
            ));
        }

        if config.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidCacheTtl(config.cache.ttl_secs));
        }

        Ok(())
    }
}
