//! Playback error types.
//!
//! These errors are internal to `sayit-audio` and are mapped to the
//! core port error at the boundary.

use sayit_core::AudioPlayerError;
use thiserror::Error;

/// Errors that can occur in the playback adapter.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No usable audio output device.
    #[error("No audio output device available: {0}")]
    DeviceUnavailable(String),

    /// Failed to open the audio output stream.
    #[error("Failed to open audio output stream: {0}")]
    OutputStream(String),

    /// The audio bytes could not be decoded.
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// Decoding succeeded but the clip has zero or unknown duration.
    #[error("Audio clip is empty (zero duration)")]
    EmptyAudio,

    /// An operation needed a staged clip and none was loaded.
    #[error("No audio loaded")]
    NothingLoaded,

    /// The player thread is gone.
    #[error("Audio thread died")]
    ThreadDied,
}

impl From<PlayerError> for AudioPlayerError {
    fn from(err: PlayerError) -> Self {
        match err {
            PlayerError::DeviceUnavailable(reason) | PlayerError::OutputStream(reason) => {
                Self::DeviceUnavailable(reason)
            }
            PlayerError::Decode(reason) => Self::Decode(reason),
            PlayerError::EmptyAudio => Self::EmptyAudio,
            PlayerError::NothingLoaded => Self::Failed("no audio loaded".to_owned()),
            PlayerError::ThreadDied => Self::Failed("audio thread died".to_owned()),
        }
    }
}
