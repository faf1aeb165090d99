//! Error taxonomy for the classification provider API.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the classification API.
///
/// None of these escape the gateway: after retries, any remaining error
/// collapses into the Medium/Medium fallback.
#[derive(Error, Debug)]
pub enum ClassifierApiError {
    /// Invalid request parameters or malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to invalid or missing API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded, retry after waiting
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// API server encountered an internal error
    #[error("API server error: {0}")]
    ServerError(String),

    /// API server is overloaded, retry later
    #[error("API server overloaded")]
    Overloaded,

    /// Network error occurred during request
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization or deserialization error
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Request timed out waiting for a response
    #[error("Timeout waiting for response")]
    Timeout,

    /// Response arrived but did not match the expected contract
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Unknown error occurred
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ClassifierApiError {
    /// Returns true if this error is transient and should be retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClassifierApiError::RateLimitExceeded
                | ClassifierApiError::ServerError(_)
                | ClassifierApiError::Overloaded
                | ClassifierApiError::Timeout
        )
    }

    /// Create an error from an HTTP status code and response body.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Self::InvalidRequest(body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::AuthenticationFailed(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            status if status.as_u16() == 529 => Self::Overloaded,
            status if status.is_server_error() => Self::ServerError(body),
            status => Self::Unknown(format!("{status}: {body}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ClassifierApiError::RateLimitExceeded.is_transient());
        assert!(ClassifierApiError::Overloaded.is_transient());
        assert!(ClassifierApiError::Timeout.is_transient());
        assert!(ClassifierApiError::ServerError("boom".to_string()).is_transient());

        assert!(!ClassifierApiError::InvalidRequest("bad".to_string()).is_transient());
        assert!(!ClassifierApiError::AuthenticationFailed("key".to_string()).is_transient());
        assert!(!ClassifierApiError::MalformedResponse("not json".to_string()).is_transient());
    }

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ClassifierApiError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ClassifierApiError::RateLimitExceeded
        ));
        assert!(matches!(
            ClassifierApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ClassifierApiError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClassifierApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            ClassifierApiError::ServerError(_)
        ));
        assert!(matches!(
            ClassifierApiError::from_status(StatusCode::from_u16(529).unwrap(), String::new()),
            ClassifierApiError::Overloaded
        ));
    }
}
