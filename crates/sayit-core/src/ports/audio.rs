//! Audio player port trait.
//!
//! The interface the core uses to drive local audio output. The
//! implementation lives in `sayit-audio` (a rodio sink confined to a
//! dedicated OS thread).

use std::time::Duration;

use thiserror::Error;

/// Failures crossing the audio player port.
#[derive(Debug, Clone, Error)]
pub enum AudioPlayerError {
    /// The output device refused to start playback. Non-fatal: the
    /// loaded audio is kept and playback can be retried.
    #[error("Audio output unavailable: {0}")]
    DeviceUnavailable(String),

    /// The audio bytes could not be decoded.
    #[error("Audio load failed: {0}")]
    Decode(String),

    /// Decoding succeeded but the clip has zero or unknown duration.
    #[error("Audio file appears to be empty (duration: 0)")]
    EmptyAudio,

    /// The player backend is gone (its thread died) or failed in a way
    /// that is not one of the above.
    #[error("Audio playback failed: {0}")]
    Failed(String),
}

/// Port trait for local audio playback.
///
/// All methods take `&self`: implementations proxy to an owning thread
/// or interior-mutable state. Natural end of playback is reported
/// through the completion callback the implementation was constructed
/// with, and only on natural drain; `stop()` never fires it.
pub trait AudioPlayerPort: Send + Sync {
    /// Decode and stage audio bytes for playback. Returns the clip
    /// duration.
    ///
    /// Readiness contract: an `Ok` means the clip decoded fully and has
    /// a positive finite duration. Zero or unknown duration is
    /// [`AudioPlayerError::EmptyAudio`] even when decoding succeeded.
    fn load(&self, bytes: Vec<u8>) -> Result<Duration, AudioPlayerError>;

    /// Drop any staged audio and halt playback.
    fn clear(&self);

    /// Start playing the staged clip from the beginning.
    fn play(&self) -> Result<(), AudioPlayerError>;

    /// Pause playback, keeping position.
    fn pause(&self);

    /// Resume paused playback. Also the retry path when `play()`
    /// reported the device unavailable: with no live sink but staged
    /// audio, this starts playback from the top.
    fn resume(&self) -> Result<(), AudioPlayerError>;

    /// Halt playback and reset the position to the start. The staged
    /// clip is kept.
    fn stop(&self);

    /// Apply a playback-rate multiplier to the live sink (and to future
    /// ones).
    fn set_rate(&self, multiplier: f32);

    /// Whether audio is currently audible.
    fn is_playing(&self) -> bool;

    /// Whether a clip is staged.
    fn has_audio(&self) -> bool;
}
