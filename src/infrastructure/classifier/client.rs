//! HTTP client for the classification provider API.
//!
//! Connection pooling, client-side token-bucket throttling, exponential
//! backoff on transient errors, and a hard request timeout.

use reqwest::{header, Client as ReqwestClient, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::errors::ClassifierApiError;
use super::rate_limiter::TokenBucketRateLimiter;
use super::retry::RetryPolicy;
use super::types::{MessageRequest, MessageResponse};
use crate::domain::models::ClassifierConfig;

/// API version header value expected by the provider.
const API_VERSION: &str = "2023-06-01";

/// Configuration for the classifier HTTP client
#[derive(Debug, Clone)]
pub struct ClassifierClientConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API
    pub base_url: String,

    /// Rate limit in requests per second
    pub rate_limit_rps: f64,

    /// Maximum retry attempts
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClassifierClientConfig {
    /// Build from application config, resolving the API key from config
    /// or the ANTHROPIC_API_KEY environment variable.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .unwrap_or_default();

        Self {
            api_key,
            base_url: config.base_url.clone(),
            rate_limit_rps: config.requests_per_second,
            max_retries: config.retry.max_retries,
            initial_backoff_ms: config.retry.initial_backoff_ms,
            max_backoff_ms: config.retry.max_backoff_ms,
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP client for the classification provider.
pub struct ClassifierClient {
    http_client: ReqwestClient,
    base_url: String,
    rate_limiter: Arc<TokenBucketRateLimiter>,
    retry_policy: RetryPolicy,
}

impl ClassifierClient {
    pub fn new(config: ClassifierClientConfig) -> Result<Self, ClassifierApiError> {
        // Scrub the API key from logs
        let api_key_scrubbed = if config.api_key.len() > 8 {
            format!("{}...[REDACTED]", &config.api_key[..8])
        } else {
            "[REDACTED]".to_string()
        };
        info!(
            "Initializing classifier client: base_url={}, rate_limit={} rps, timeout={}s, api_key={}",
            config.base_url, config.rate_limit_rps, config.timeout_secs, api_key_scrubbed
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&config.api_key).map_err(|e| {
                ClassifierApiError::InvalidRequest(format!("Invalid API key: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(ClassifierApiError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            rate_limiter: Arc::new(TokenBucketRateLimiter::new(config.rate_limit_rps)),
            retry_policy: RetryPolicy::new(
                config.max_retries,
                config.initial_backoff_ms,
                config.max_backoff_ms,
            ),
        })
    }

    /// Send a message request and get the response.
    #[instrument(skip(self, request), fields(model = %request.model, max_tokens = request.max_tokens))]
    pub async fn send_message(
        &self,
        request: MessageRequest,
    ) -> Result<MessageResponse, ClassifierApiError> {
        self.rate_limiter.acquire().await;

        self.retry_policy
            .execute(|| async { self.execute_message_request(&request).await })
            .await
    }

    async fn execute_message_request(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ClassifierApiError> {
        let url = format!("{}/v1/messages", self.base_url);
        debug!("POST {url}");

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierApiError::Timeout
                } else {
                    ClassifierApiError::NetworkError(e)
                }
            })?;

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: Response,
    ) -> Result<MessageResponse, ClassifierApiError> {
        let status = response.status();
        debug!("response status: {status}");

        if !status.is_success() {
            return Err(self.handle_error_response(status, response).await);
        }

        let message_response: MessageResponse = response.json().await?;
        Ok(message_response)
    }

    async fn handle_error_response(
        &self,
        status: StatusCode,
        response: Response,
    ) -> ClassifierApiError {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        warn!("API error ({status}): {body}");
        ClassifierApiError::from_status(status, body)
    }
}
