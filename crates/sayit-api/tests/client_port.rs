//! Integration tests for the speech client through the core port,
//! using a mock HTTP transport. No network access required.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sayit_api::{ApiError, ApiResult, HttpBackend, SpeechApiClient};
use sayit_core::{AudioResource, SpeechBackendPort, SpeechPortError, SynthesisRequest};
use serde_json::{Value, json};
use url::Url;

// ── Mock transport ─────────────────────────────────────────────────

struct MockHttp {
    post_response: Result<Value, u16>,
    error_payload: Option<String>,
    bytes: Vec<u8>,
    posts: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockHttp {
    fn answering(post_response: Value) -> Self {
        Self {
            post_response: Ok(post_response),
            error_payload: None,
            bytes: vec![1, 2, 3],
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing(status: u16, error_payload: Option<&str>) -> Self {
        Self {
            post_response: Err(status),
            error_payload: error_payload.map(str::to_owned),
            bytes: Vec::new(),
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle onto the recorded requests, usable after the transport
    /// moves into the client.
    fn recorded(&self) -> Arc<Mutex<Vec<(String, Value)>>> {
        Arc::clone(&self.posts)
    }
}

#[async_trait]
impl HttpBackend for MockHttp {
    async fn post_json(&self, url: &Url, body: Value) -> ApiResult<Value> {
        self.posts
            .lock()
            .unwrap()
            .push((url.path().to_owned(), body));
        match &self.post_response {
            Ok(value) => Ok(value.clone()),
            Err(status) => Err(ApiError::Api {
                status: *status,
                message: self.error_payload.clone(),
            }),
        }
    }

    async fn get_bytes(&self, _url: &Url) -> ApiResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

fn client(http: MockHttp) -> SpeechApiClient<MockHttp> {
    SpeechApiClient::with_backend(http, Url::parse("http://127.0.0.1:5000").unwrap())
}

// ── Detection ──────────────────────────────────────────────────────

#[tokio::test]
async fn detection_maps_wire_response_to_domain() {
    let client = client(MockHttp::answering(json!({
        "success": true, "lang": "fr", "lang_name": "French"
    })));

    let detected = client.detect_language("Bonjour tout le monde").await.unwrap();
    let detected = detected.unwrap();
    assert_eq!(detected.code, "fr");
    assert_eq!(detected.display_name, "French");
}

#[tokio::test]
async fn detection_posts_the_text_to_the_right_endpoint() {
    let http = MockHttp::answering(json!({
        "success": true, "lang": "fr", "lang_name": "French"
    }));
    let recorded = http.recorded();
    let client = client(http);

    client.detect_language("Bonjour tout le monde").await.unwrap();

    let posts = recorded.lock().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "/api/detect-language");
    assert_eq!(posts[0].1["text"], "Bonjour tout le monde");
}

#[tokio::test]
async fn synthesis_carries_text_language_and_speed() {
    let http = MockHttp::answering(json!({
        "success": true, "filename": "speech_1.mp3"
    }));
    let recorded = http.recorded();
    let client = client(http);

    client
        .synthesize(&SynthesisRequest {
            text: "Bonjour tout le monde".to_owned(),
            language: "auto".to_owned(),
            speed: 1.0,
        })
        .await
        .unwrap();

    let posts = recorded.lock().unwrap();
    assert_eq!(posts[0].0, "/api/speak");
    assert_eq!(posts[0].1["lang"], "auto");
    assert!((posts[0].1["speed"].as_f64().unwrap() - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn detection_without_a_code_is_nothing_detected() {
    let client = client(MockHttp::answering(json!({ "success": false })));
    assert!(client.detect_language("whatever text").await.unwrap().is_none());
}

#[tokio::test]
async fn detection_uses_lang_even_when_success_is_false() {
    // The service reports detection failure as success=false with a
    // fallback language; the code alone decides.
    let client = client(MockHttp::answering(json!({
        "success": false, "lang": "en", "lang_name": "English"
    })));

    let detected = client.detect_language("short text").await.unwrap().unwrap();
    assert_eq!(detected.code, "en");
}

// ── Synthesis ──────────────────────────────────────────────────────

#[tokio::test]
async fn synthesis_maps_success_response() {
    let client = client(MockHttp::answering(json!({
        "success": true,
        "filename": "speech_1712_42.mp3",
        "lang": "es",
        "lang_name": "Spanish",
        "voice_used": "Edge TTS - es-ES-ElviraNeural (Female)"
    })));

    let outcome = client
        .synthesize(&SynthesisRequest {
            text: "Hola a todos".to_owned(),
            language: "auto".to_owned(),
            speed: 1.0,
        })
        .await
        .unwrap();

    assert_eq!(outcome.audio.id, "speech_1712_42.mp3");
    let resolved = outcome.resolved.unwrap();
    assert_eq!(resolved.code, "es");
    assert_eq!(resolved.display_name, "Spanish");
    assert!(outcome.voice.unwrap().contains("Elvira"));
}

#[tokio::test]
async fn synthesis_error_payload_becomes_service_error() {
    let client = client(MockHttp::failing(500, Some("Failed to generate speech. Please check server console for details.")));

    let err = client
        .synthesize(&SynthesisRequest {
            text: "Hola".to_owned(),
            language: "es".to_owned(),
            speed: 1.0,
        })
        .await
        .unwrap_err();

    match err {
        SpeechPortError::Service { message } => {
            assert!(message.unwrap().contains("check server console"));
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn synthesis_success_flag_false_is_a_service_error() {
    let client = client(MockHttp::answering(json!({
        "success": false, "error": "voice unavailable"
    })));

    let err = client
        .synthesize(&SynthesisRequest {
            text: "Hola".to_owned(),
            language: "es".to_owned(),
            speed: 1.0,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SpeechPortError::Service { message: Some(m) } if m == "voice unavailable"
    ));
}

// ── Audio fetch ────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_audio_returns_bytes() {
    let client = client(MockHttp::answering(json!({})));
    let bytes = client
        .fetch_audio(&AudioResource {
            id: "speech_1.mp3".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(bytes, vec![1, 2, 3]);
}
