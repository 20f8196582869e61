//! Internal error types for speech service operations.
//!
//! These errors are internal to `sayit-api` and are mapped to the core
//! port error at the boundary.

use thiserror::Error;

/// Result type alias for speech service operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to speech service API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with an error status. `message` carries the
    /// `{error}` payload when one was parseable.
    #[error("Speech service request failed with status {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error payload, if any.
        message: Option<String>,
    },

    /// The service answered with an unexpected body.
    #[error("Invalid response from speech service: {message}")]
    InvalidResponse {
        /// Description of what was invalid.
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_carries_status() {
        let error = ApiError::Api {
            status: 500,
            message: Some("synthesis failed".to_owned()),
        };
        assert!(error.to_string().contains("500"));
    }

    #[test]
    fn invalid_response_message() {
        let error = ApiError::InvalidResponse {
            message: "missing field 'filename'".to_owned(),
        };
        assert!(error.to_string().contains("missing field"));
    }
}
