//! Wire types for the speech service JSON API.

use serde::{Deserialize, Serialize};

/// `POST /api/detect-language` request body.
#[derive(Debug, Clone, Serialize)]
pub struct DetectRequest<'a> {
    pub text: &'a str,
}

/// `POST /api/detect-language` response.
///
/// The service answers `success: false` with a fallback language when
/// detection fails; only `lang` is authoritative here (a missing or
/// empty code means "nothing detected", regardless of `success`).
#[derive(Debug, Clone, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub lang_name: Option<String>,
}

/// `POST /api/speak` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SpeakRequest<'a> {
    pub text: &'a str,
    pub lang: &'a str,
    pub speed: f32,
}

/// `POST /api/speak` success response.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakResponse {
    #[serde(default)]
    pub success: bool,

    /// Filename of the synthesized audio; the audio resource id.
    pub filename: String,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub lang_name: Option<String>,

    #[serde(default)]
    pub voice_used: Option<String>,
}

/// Structured error payload carried on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_response_parses_service_shape() {
        let json = r#"{"success": true, "lang": "fr", "lang_name": "French"}"#;
        let parsed: DetectResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.lang.as_deref(), Some("fr"));
        assert_eq!(parsed.lang_name.as_deref(), Some("French"));
    }

    #[test]
    fn detect_response_tolerates_missing_fields() {
        let parsed: DetectResponse = serde_json::from_str("{}").unwrap();
        assert!(!parsed.success);
        assert!(parsed.lang.is_none());
    }

    #[test]
    fn speak_response_parses_service_shape() {
        let json = r#"{
            "success": true,
            "filename": "speech_1712_42.mp3",
            "lang": "es",
            "lang_name": "Spanish",
            "voice_used": "Edge TTS - es-ES-ElviraNeural (Female)"
        }"#;
        let parsed: SpeakResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.filename, "speech_1712_42.mp3");
        assert_eq!(parsed.lang.as_deref(), Some("es"));
        assert_eq!(
            parsed.voice_used.as_deref(),
            Some("Edge TTS - es-ES-ElviraNeural (Female)")
        );
    }

    #[test]
    fn speak_request_serializes_expected_keys() {
        let request = SpeakRequest {
            text: "Bonjour",
            lang: "auto",
            speed: 1.25,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["text"], "Bonjour");
        assert_eq!(json["lang"], "auto");
        assert!((json["speed"].as_f64().unwrap() - 1.25).abs() < 1e-6);
    }

    #[test]
    fn error_response_tolerates_absent_message() {
        let parsed: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.error.is_none());

        let parsed: ErrorResponse =
            serde_json::from_str(r#"{"error": "No text provided"}"#).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("No text provided"));
    }
}
