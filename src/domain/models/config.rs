use serde::{Deserialize, Serialize};

/// Main configuration structure for taskwise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-actor creation rate limit
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Classification provider configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Classification cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Actor resolved by the identity adapter (CLI deployments)
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".taskwise/taskwise.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Per-actor creation rate limit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Maximum task creations per actor per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

const fn default_max_requests() -> u32 {
    10
}

const fn default_window_secs() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

/// Classification provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassifierConfig {
    /// API key (can also be set via TASKWISE_CLASSIFIER__API_KEY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the API (for testing/proxies)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client-side request rate limit in requests per second
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for transient errors
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

const fn default_requests_per_second() -> f64 {
    5.0
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            requests_per_second: default_requests_per_second(),
            timeout_secs: default_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Classification cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Entry time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached entries
    #[serde(default = "default_capacity")]
    pub capacity: u64,
}

const fn default_ttl_secs() -> u64 {
    3600
}

const fn default_capacity() -> u64 {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            capacity: default_capacity(),
        }
    }
}

/// Actor configuration for the static identity adapter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActorConfig {
    /// Actor UUID (also TASKWISE_ACTOR__ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Actor email (also TASKWISE_ACTOR__EMAIL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
