//! Speech session error taxonomy.
//!
//! Every failure is terminal for its one operation: nothing retries,
//! and the controller returns the session to a controllable Idle state
//! before reporting. Detection failures are deliberately absent here -
//! they are logged and swallowed inside the controller.

use thiserror::Error;

use crate::ports::{AudioPlayerError, SpeechPortError};

/// Errors surfaced by a speech session.
#[derive(Debug, Clone, Error)]
pub enum SpeakError {
    /// Empty or whitespace-only input: reported inline, no request
    /// sent.
    #[error("Please enter some text first")]
    EmptyText,

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a structured failure.
    #[error("{0}")]
    Service(String),

    /// The audio failed to load, timed out, or reported an invalid
    /// duration.
    #[error("{0}")]
    Media(String),
}

impl From<SpeechPortError> for SpeakError {
    fn from(err: SpeechPortError) -> Self {
        match err {
            SpeechPortError::Transport(message) => Self::Transport(message),
            SpeechPortError::Service { message } => {
                Self::Service(message.unwrap_or_else(|| "Failed to generate speech".to_owned()))
            }
            // An unparseable response is reported like a failure to
            // reach the service: there is no payload to quote.
            SpeechPortError::InvalidResponse(message) => {
                Self::Transport(format!("invalid response: {message}"))
            }
        }
    }
}

impl From<AudioPlayerError> for SpeakError {
    fn from(err: AudioPlayerError) -> Self {
        Self::Media(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_without_payload_uses_generic_message() {
        let err = SpeakError::from(SpeechPortError::Service { message: None });
        assert_eq!(err.to_string(), "Failed to generate speech");
    }

    #[test]
    fn empty_audio_maps_to_media() {
        let err = SpeakError::from(AudioPlayerError::EmptyAudio);
        assert!(matches!(err, SpeakError::Media(_)));
        assert!(err.to_string().contains("duration: 0"));
    }
}
