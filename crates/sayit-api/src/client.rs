//! Speech service client.

use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{DetectRequest, DetectResponse, SpeakRequest, SpeakResponse};
use crate::url::{audio_url, detect_language_url, speak_url};

/// Client for the speech service, generic over the HTTP transport so
/// tests can inject a mock.
pub struct SpeechApiClient<B: HttpBackend> {
    http: B,
    base: Url,
}

/// The production client type.
pub type DefaultSpeechClient = SpeechApiClient<ReqwestBackend>;

impl DefaultSpeechClient {
    /// Build a client from configuration, using the reqwest transport.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Ok(Self {
            http: ReqwestBackend::new(),
            base: config.parsed_base()?,
        })
    }
}

impl<B: HttpBackend> SpeechApiClient<B> {
    /// Build a client over a specific transport (used by tests).
    pub const fn with_backend(http: B, base: Url) -> Self {
        Self { http, base }
    }

    /// Call the detection endpoint.
    pub async fn detect(&self, text: &str) -> ApiResult<DetectResponse> {
        let url = detect_language_url(&self.base)?;
        let body = serde_json::to_value(DetectRequest { text })?;
        let value = self.http.post_json(&url, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Call the synthesis endpoint.
    pub async fn speak(&self, text: &str, lang: &str, speed: f32) -> ApiResult<SpeakResponse> {
        let url = speak_url(&self.base)?;
        let body = serde_json::to_value(SpeakRequest { text, lang, speed })?;
        let value = self.http.post_json(&url, body).await?;

        // A 2xx answer can still carry a failure flag; treat it like a
        // structured service error.
        if !value.get("success").and_then(Value::as_bool).unwrap_or(false) {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_owned);
            return Err(ApiError::Api {
                status: 200,
                message,
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Fetch the bytes of a synthesized audio file.
    pub async fn audio(&self, filename: &str) -> ApiResult<Vec<u8>> {
        let url = audio_url(&self.base, filename)?;
        self.http.get_bytes(&url).await
    }
}
