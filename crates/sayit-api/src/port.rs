//! `SpeechBackendPort` implementation - maps wire types and internal
//! errors to core domain types at the boundary.

use async_trait::async_trait;
use sayit_core::{
    AudioResource, DetectedLanguage, SpeechBackendPort, SpeechPortError, SynthesisOutcome,
    SynthesisRequest, display_name,
};

use crate::client::SpeechApiClient;
use crate::error::ApiError;
use crate::http::HttpBackend;

impl From<ApiError> for SpeechPortError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Api { message, .. } => Self::Service { message },
            ApiError::Network(e) => Self::Transport(e.to_string()),
            ApiError::InvalidUrl(e) => Self::Transport(format!("invalid server URL: {e}")),
            ApiError::InvalidResponse { message } => Self::InvalidResponse(message),
            ApiError::JsonParse(e) => Self::InvalidResponse(e.to_string()),
        }
    }
}

/// Pair a code with the best display name available: the wire name if
/// the service sent one, the catalog name otherwise, the raw code as a
/// last resort.
fn detected(code: String, wire_name: Option<String>) -> DetectedLanguage {
    let display_name = wire_name
        .filter(|name| !name.is_empty())
        .or_else(|| display_name(&code).map(str::to_owned))
        .unwrap_or_else(|| code.clone());
    DetectedLanguage { code, display_name }
}

#[async_trait]
impl<B: HttpBackend> SpeechBackendPort for SpeechApiClient<B> {
    async fn detect_language(
        &self,
        text: &str,
    ) -> Result<Option<DetectedLanguage>, SpeechPortError> {
        let response = self.detect(text).await.map_err(SpeechPortError::from)?;

        // Only `lang` is authoritative: a response without a usable
        // code is "nothing detected", whatever `success` says.
        Ok(response
            .lang
            .filter(|code| !code.is_empty())
            .map(|code| detected(code, response.lang_name)))
    }

    async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesisOutcome, SpeechPortError> {
        let response = self
            .speak(&request.text, &request.language, request.speed)
            .await
            .map_err(SpeechPortError::from)?;

        let resolved = response
            .lang
            .filter(|code| !code.is_empty() && code != "auto")
            .map(|code| detected(code, response.lang_name));

        Ok(SynthesisOutcome {
            audio: AudioResource {
                id: response.filename,
            },
            resolved,
            voice: response.voice_used,
        })
    }

    async fn fetch_audio(&self, resource: &AudioResource) -> Result<Vec<u8>, SpeechPortError> {
        self.audio(&resource.id)
            .await
            .map_err(SpeechPortError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detected_prefers_wire_name_then_catalog() {
        let d = detected("fr".to_owned(), Some("Français".to_owned()));
        assert_eq!(d.display_name, "Français");

        let d = detected("fr".to_owned(), None);
        assert_eq!(d.display_name, "French");

        let d = detected("eo".to_owned(), None);
        assert_eq!(d.display_name, "eo");
    }

    #[test]
    fn api_errors_map_to_port_taxonomy() {
        let err = SpeechPortError::from(ApiError::Api {
            status: 500,
            message: Some("synthesis failed".to_owned()),
        });
        assert!(matches!(err, SpeechPortError::Service { message: Some(m) } if m == "synthesis failed"));

        let err = SpeechPortError::from(ApiError::InvalidResponse {
            message: "not json".to_owned(),
        });
        assert!(matches!(err, SpeechPortError::InvalidResponse(_)));
    }
}
