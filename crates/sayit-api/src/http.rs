//! HTTP backend abstraction for the speech service API.
//!
//! A trait-based transport that allows dependency injection in tests.
//! The production implementation uses reqwest. There is deliberately no
//! retry logic: every failure is terminal for its one operation, and
//! the client carries no request timeout (the only ceiling in the
//! system bounds audio readiness, in the core).

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::models::ErrorResponse;

/// Trait for HTTP transports the client can talk through.
///
/// This is an implementation detail - external code should use the
/// core `SpeechBackendPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST a JSON body and return the parsed JSON response.
    async fn post_json(&self, url: &Url, body: Value) -> ApiResult<Value>;

    /// GET raw bytes.
    async fn get_bytes(&self, url: &Url) -> ApiResult<Vec<u8>>;
}

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestBackend {
    /// Create the reqwest transport.
    #[must_use]
    pub fn new() -> Self {
        // No .timeout(): synthesis can legitimately take a while, and
        // the only ceiling in the system bounds audio readiness.
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }

    /// Turn a non-2xx response into an [`ApiError::Api`], quoting the
    /// structured `{error}` payload when one is present.
    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|payload| payload.error);
        ApiError::Api { status, message }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, url: &Url, body: Value) -> ApiResult<Value> {
        tracing::debug!(url = %url, "POST");
        let response = self.client.post(url.as_str()).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(response.json::<Value>().await?)
    }

    async fn get_bytes(&self, url: &Url) -> ApiResult<Vec<u8>> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }
}
