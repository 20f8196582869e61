//! Endpoint URL construction.

use url::Url;

use crate::error::ApiResult;

/// URL of the language detection endpoint.
pub fn detect_language_url(base: &Url) -> ApiResult<Url> {
    Ok(base.join("/api/detect-language")?)
}

/// URL of the synthesis endpoint.
pub fn speak_url(base: &Url) -> ApiResult<Url> {
    Ok(base.join("/api/speak")?)
}

/// URL of a synthesized audio resource, derived from its id.
pub fn audio_url(base: &Url, filename: &str) -> ApiResult<Url> {
    let encoded = urlencoding::encode(filename);
    Ok(base.join(&format!("/api/audio/{encoded}"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:5000").unwrap()
    }

    #[test]
    fn endpoint_urls() {
        assert_eq!(
            detect_language_url(&base()).unwrap().as_str(),
            "http://127.0.0.1:5000/api/detect-language"
        );
        assert_eq!(
            speak_url(&base()).unwrap().as_str(),
            "http://127.0.0.1:5000/api/speak"
        );
    }

    #[test]
    fn audio_url_encodes_the_filename() {
        assert_eq!(
            audio_url(&base(), "speech_1712_42.mp3").unwrap().as_str(),
            "http://127.0.0.1:5000/api/audio/speech_1712_42.mp3"
        );
        // Anything odd in the id must not break the path.
        assert_eq!(
            audio_url(&base(), "a b/c.mp3").unwrap().as_str(),
            "http://127.0.0.1:5000/api/audio/a%20b%2Fc.mp3"
        );
    }
}
