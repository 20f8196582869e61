//! Client configuration.

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Default address of the speech service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Configuration for the speech service client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the service (scheme + host + port).
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Configuration pointing at a specific server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Parse the configured base URL.
    pub fn parsed_base(&self) -> ApiResult<Url> {
        Url::parse(&self.base_url).map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert!(config.parsed_base().is_ok());
    }

    #[test]
    fn garbage_base_url_is_rejected() {
        let config = ApiConfig::with_base_url("not a url");
        assert!(config.parsed_base().is_err());
    }
}
