//! Speech backend port trait.
//!
//! The interface the core uses to talk to the remote speech service.
//! The implementation lives in `sayit-api`.
//!
//! # Design
//!
//! - Uses core-owned DTOs, not wire types
//! - Returns `SpeechPortError` for all failures
//! - Async methods for network operations
//! - No implementation details leak through this interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::DetectedLanguage;

/// Opaque identifier of a synthesized audio resource. The backend
/// adapter knows how to turn it into a fetchable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResource {
    /// Resource identifier as issued by the synthesis endpoint.
    pub id: String,
}

/// One synthesis request: text plus the resolved language code (or the
/// `auto` sentinel) and the effective speed multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: String,
    pub speed: f32,
}

/// A successful synthesis response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    /// Where to fetch the synthesized audio from.
    pub audio: AudioResource,

    /// The language the backend actually used (present when the backend
    /// resolved `auto` server-side, or echoed the request language).
    pub resolved: Option<DetectedLanguage>,

    /// Voice metadata for the status line, when the backend reports it.
    pub voice: Option<String>,
}

/// Failures crossing the speech backend port.
#[derive(Debug, Clone, Error)]
pub enum SpeechPortError {
    /// The backend could not be reached (connection refused, DNS, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a structured failure. The message is
    /// taken from the error payload when present.
    #[error("{}", message.as_deref().unwrap_or("Failed to generate speech"))]
    Service {
        /// Message from the error payload, if any.
        message: Option<String>,
    },

    /// The backend answered with something unparseable.
    #[error("Invalid response from speech service: {0}")]
    InvalidResponse(String),
}

/// Port trait for the remote speech service.
#[async_trait]
pub trait SpeechBackendPort: Send + Sync {
    /// Infer the language of `text`.
    ///
    /// `Ok(None)` means the service answered but produced no usable
    /// language code; the caller treats it as "nothing detected".
    async fn detect_language(
        &self,
        text: &str,
    ) -> Result<Option<DetectedLanguage>, SpeechPortError>;

    /// Synthesize speech for the request and return the audio resource
    /// plus resolved-language metadata.
    async fn synthesize(&self, request: &SynthesisRequest)
    -> Result<SynthesisOutcome, SpeechPortError>;

    /// Fetch the raw audio bytes for a resource.
    async fn fetch_audio(&self, resource: &AudioResource) -> Result<Vec<u8>, SpeechPortError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn SpeechBackendPort>) {}

    #[test]
    fn service_error_falls_back_to_generic_message() {
        let err = SpeechPortError::Service { message: None };
        assert_eq!(err.to_string(), "Failed to generate speech");

        let err = SpeechPortError::Service {
            message: Some("voice unavailable".to_owned()),
        };
        assert_eq!(err.to_string(), "voice unavailable");
    }
}
