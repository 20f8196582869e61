//! Audio playback via `rodio`.
//!
//! [`RodioPlayer`] owns the output stream and sink and never leaves the
//! thread it was created on (see [`thread`](crate::thread) for the
//! `Send + Sync` proxy). Loading decodes the whole clip up front: that
//! is the readiness check, and it yields the duration the controller
//! validates against.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::PlayerError;

/// Callback invoked when playback finishes naturally (queued audio
/// drained; never for an explicit stop).
pub type PlaybackFinishedCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// A staged, fully decoded clip.
struct Clip {
    bytes: Vec<u8>,
    duration: Duration,
}

/// Audio playback over the default output device.
pub struct RodioPlayer {
    /// rodio output stream (must be kept alive).
    _stream: OutputStream,

    /// Handle used to create sinks.
    stream_handle: OutputStreamHandle,

    /// Current playback sink (if any).
    sink: Option<Arc<Sink>>,

    /// Staged clip, kept across stop() so playback can restart.
    clip: Option<Clip>,

    /// Playback-rate multiplier applied to the live and future sinks.
    rate: f32,

    /// Whether the completion watcher should fire on drain.
    is_playing: Arc<AtomicBool>,

    /// Fired on natural end of playback.
    on_finished: PlaybackFinishedCallback,
}

impl RodioPlayer {
    /// Create a player on the default output device.
    pub fn new(on_finished: PlaybackFinishedCallback) -> Result<Self, PlayerError> {
        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| match e {
            rodio::StreamError::NoDevice => {
                PlayerError::DeviceUnavailable("no output device".to_owned())
            }
            other => PlayerError::OutputStream(other.to_string()),
        })?;

        tracing::info!("Audio playback initialized on default output device");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            clip: None,
            rate: 1.0,
            is_playing: Arc::new(AtomicBool::new(false)),
            on_finished,
        })
    }

    /// Decode and stage a clip, replacing any previous one. Returns the
    /// clip duration.
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<Duration, PlayerError> {
        self.stop();

        let duration = probe_duration(&bytes)?;
        tracing::debug!(
            bytes = bytes.len(),
            duration_ms = duration.as_millis(),
            "Audio clip staged"
        );

        self.clip = Some(Clip { bytes, duration });
        Ok(duration)
    }

    /// Drop the staged clip and halt playback.
    pub fn clear(&mut self) {
        self.stop();
        self.clip = None;
    }

    /// Start playing the staged clip from the beginning.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        // Stop any existing playback first.
        self.stop();

        let clip = self.clip.as_ref().ok_or(PlayerError::NothingLoaded)?;

        let sink = Sink::try_new(&self.stream_handle).map_err(|e| match e {
            rodio::PlayError::NoDevice => {
                PlayerError::DeviceUnavailable("no output device".to_owned())
            }
            other => PlayerError::OutputStream(other.to_string()),
        })?;

        let source = Decoder::new(Cursor::new(clip.bytes.clone()))
            .map_err(|e| PlayerError::Decode(e.to_string()))?;
        sink.append(source);
        sink.set_speed(self.rate);

        self.is_playing.store(true, Ordering::SeqCst);
        let sink = Arc::new(sink);
        self.sink = Some(Arc::clone(&sink));
        self.spawn_completion_watcher(sink);

        tracing::debug!(rate = self.rate, "Audio playback started");
        Ok(())
    }

    /// Pause playback, keeping position.
    pub fn pause(&self) {
        if let Some(ref sink) = self.sink {
            sink.pause();
            tracing::debug!("Audio playback paused");
        }
    }

    /// Resume paused playback. With no live sink but a staged clip this
    /// starts playback from the top (the retry path after the output
    /// device refused to start).
    pub fn resume(&mut self) -> Result<(), PlayerError> {
        match self.sink {
            Some(ref sink) => {
                sink.play();
                tracing::debug!("Audio playback resumed");
                Ok(())
            }
            None if self.clip.is_some() => self.play(),
            None => Err(PlayerError::NothingLoaded),
        }
    }

    /// Halt playback and reset the position to the start. The staged
    /// clip is kept.
    pub fn stop(&mut self) {
        // Clear the flag before stopping the sink so the completion
        // watcher sees an explicit stop and suppresses the callback.
        self.is_playing.store(false, Ordering::SeqCst);
        if let Some(sink) = self.sink.take() {
            sink.stop();
            tracing::debug!("Audio playback stopped");
        }
    }

    /// Apply a playback-rate multiplier to the live sink (position is
    /// untouched) and remember it for future sinks.
    pub fn set_rate(&mut self, multiplier: f32) {
        self.rate = multiplier.max(0.1);
        if let Some(ref sink) = self.sink {
            sink.set_speed(self.rate);
        }
    }

    /// Whether audio is currently audible.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.empty() && !sink.is_paused())
    }

    /// Whether a clip is staged.
    #[must_use]
    pub const fn has_audio(&self) -> bool {
        self.clip.is_some()
    }

    /// Spawn a background thread that blocks until the sink drains or
    /// playback is stopped externally. On natural completion, fires the
    /// finished callback.
    fn spawn_completion_watcher(&self, sink: Arc<Sink>) {
        let is_playing = Arc::clone(&self.is_playing);
        let on_finished = Arc::clone(&self.on_finished);

        // `sleep_until_end()` returns when the queue drains or when
        // `stop()` drops the internal sources.
        std::thread::spawn(move || {
            sink.sleep_until_end();

            // If stop() was called, is_playing is already false and the
            // callback stays silent.
            if !is_playing.swap(false, Ordering::SeqCst) {
                return;
            }

            tracing::debug!("Playback finished naturally");
            on_finished();
        });
    }
}

/// Decode the clip fully and compute its duration.
///
/// This is the readiness probe: a clip that cannot be decoded, or whose
/// duration comes out zero or unknown, is rejected here so playback of
/// empty or corrupted audio can never start.
pub fn probe_duration(bytes: &[u8]) -> Result<Duration, PlayerError> {
    let source = Decoder::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| PlayerError::Decode(e.to_string()))?;

    let duration = match source.total_duration() {
        Some(duration) => duration,
        None => {
            // Some formats (notably mp3) report no length up front;
            // count the decoded samples instead.
            let channels = u64::from(source.channels());
            let sample_rate = u64::from(source.sample_rate());
            let samples = source.count() as u64;
            if channels == 0 || sample_rate == 0 {
                return Err(PlayerError::EmptyAudio);
            }
            Duration::from_secs_f64(samples as f64 / (channels * sample_rate) as f64)
        }
    };

    if duration.is_zero() {
        return Err(PlayerError::EmptyAudio);
    }

    Ok(duration)
}
