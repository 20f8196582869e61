//! Speech controller - orchestrates one speech session at a time.
//!
//! The controller owns the [`SessionState`] and drives it through
//! request, audio loading, and playback. It emits [`UiEvent`]s for the
//! frontend to render and receives deferred work (debounce firings,
//! playback completion) back through [`ControllerSignal`]s, which the
//! frontend's event loop feeds into [`handle_signal`].
//!
//! [`handle_signal`]: SpeechController::handle_signal

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::domain::{LanguageSelection, PlaybackPhase, SelectionOrigin, SessionState, language};
use crate::error::SpeakError;
use crate::events::{ControllerSignal, StatusKind, UiEvent};
use crate::ports::{
    AudioPlayerError, AudioPlayerPort, SpeechBackendPort, SynthesisOutcome, SynthesisRequest,
};
use crate::services::debounce::Debouncer;

/// Trimmed input must be longer than this before detection fires.
pub const DETECTION_MIN_CHARS: usize = 5;

/// Quiet period before a detection request is issued.
pub const DETECTION_DEBOUNCE: Duration = Duration::from_millis(800);

/// Ceiling on fetching and decoding the synthesized audio. Bounds
/// readiness only; the synthesis request itself carries no client
/// timeout.
pub const AUDIO_READY_TIMEOUT: Duration = Duration::from_secs(10);

/// The speech session orchestrator.
pub struct SpeechController {
    backend: Arc<dyn SpeechBackendPort>,
    player: Arc<dyn AudioPlayerPort>,
    session: SessionState,
    debouncer: Debouncer,
    event_tx: mpsc::UnboundedSender<UiEvent>,
    signal_tx: mpsc::UnboundedSender<ControllerSignal>,
}

impl SpeechController {
    /// Create a controller.
    ///
    /// `signal_tx` is the sender half of the frontend's signal channel;
    /// the controller hands it to its debounce timer (and the caller
    /// typically also hands a clone to the player's completion
    /// callback). Returns the controller and the receiver for
    /// [`UiEvent`]s.
    #[must_use]
    pub fn new(
        backend: Arc<dyn SpeechBackendPort>,
        player: Arc<dyn AudioPlayerPort>,
        signal_tx: mpsc::UnboundedSender<ControllerSignal>,
    ) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let controller = Self {
            backend,
            player,
            session: SessionState::new(),
            debouncer: Debouncer::new(DETECTION_DEBOUNCE),
            event_tx,
            signal_tx,
        };

        (controller, event_rx)
    }

    /// Current session state (read-only snapshot for frontends and
    /// tests).
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Emit the initial control surface so a freshly attached frontend
    /// can render without waiting for the first interaction.
    pub fn announce(&self) {
        let speed = &self.session.speed;
        self.emit(UiEvent::SpeedChanged {
            label: speed.label(),
            multiplier: speed.multiplier(),
            at_min: speed.at_min(),
            at_max: speed.at_max(),
        });
        self.emit(UiEvent::ControlsChanged(self.session.controls()));
        self.emit(UiEvent::CharCount(0));
    }

    // ── Input tracking ─────────────────────────────────────────────

    /// Record an input change: updates the character counter and
    /// schedules (or cancels) debounced language detection.
    ///
    /// A keystroke replaces any pending detection timer; input at or
    /// below the length threshold cancels it and forces the selector
    /// back to auto.
    pub fn handle_input(&mut self, text: &str) {
        self.emit(UiEvent::CharCount(text.chars().count()));

        let trimmed = text.trim();
        if trimmed.chars().count() > DETECTION_MIN_CHARS {
            let tx = self.signal_tx.clone();
            let text = trimmed.to_owned();
            self.debouncer.schedule(move || {
                let _ = tx.send(ControllerSignal::DetectionElapsed { text });
            });
        } else {
            self.debouncer.cancel();
            if !self.session.selection.is_auto() {
                self.select_language(LanguageSelection::Auto, SelectionOrigin::Programmatic);
                self.emit(UiEvent::Banner(None));
            }
        }
    }

    // ── Signals ────────────────────────────────────────────────────

    /// Process a deferred signal from the frontend's event loop.
    pub async fn handle_signal(&mut self, signal: ControllerSignal) {
        match signal {
            ControllerSignal::DetectionElapsed { text } => self.run_detection(&text).await,
            ControllerSignal::PlaybackFinished => self.on_playback_finished(),
        }
    }

    /// Ask the backend to infer the input language and apply the result
    /// to the selector.
    ///
    /// Best-effort: failures are logged and never surfaced. A response
    /// arriving after newer input may still overwrite the selector;
    /// the pending-timer cancellation does not abort a request already
    /// sent.
    async fn run_detection(&mut self, text: &str) {
        // Bind before matching: the boxed future borrows the backend,
        // and the arms need `&mut self`.
        let result = self.backend.detect_language(text).await;
        match result {
            Ok(Some(detected)) => {
                tracing::debug!(code = %detected.code, "Language detected");
                self.session.detected = Some(detected.clone());

                if language::is_selectable(&detected.code) {
                    self.select_language(
                        LanguageSelection::Code(detected.code.clone()),
                        SelectionOrigin::Programmatic,
                    );
                    self.emit(UiEvent::Banner(Some(format!(
                        "Auto-detected: {} ({})",
                        detected.display_name, detected.code
                    ))));
                } else {
                    self.select_language(LanguageSelection::Auto, SelectionOrigin::Programmatic);
                    self.emit(UiEvent::Banner(Some(format!(
                        "Detected: {} ({}) - using auto",
                        detected.display_name, detected.code
                    ))));
                }
            }
            Ok(None) => {
                tracing::debug!("Detection returned no usable language");
            }
            Err(e) => {
                // Detection is a convenience: no user-facing error.
                tracing::warn!(error = %e, "Language detection failed");
            }
        }
    }

    // ── Selection ──────────────────────────────────────────────────

    /// Change the language selection.
    ///
    /// Only `User`-origin changes fire the manual-selection banner;
    /// programmatic updates (detection results, resolved languages)
    /// leave banner handling to their caller.
    pub fn select_language(&mut self, selection: LanguageSelection, origin: SelectionOrigin) {
        self.session.selection = selection.clone();
        self.emit(UiEvent::SelectionChanged {
            selection: selection.clone(),
            origin,
        });

        if origin == SelectionOrigin::User {
            let banner = match &selection {
                LanguageSelection::Auto => None,
                LanguageSelection::Code(code) => Some(format!(
                    "Selected Language: {} ({code})",
                    selection.label()
                )),
            };
            self.emit(UiEvent::Banner(banner));
        }
    }

    // ── Speed ──────────────────────────────────────────────────────

    /// Step the playback rate up one position (no-op at the top).
    pub fn increase_speed(&mut self) {
        if self.session.speed.increase() {
            self.after_speed_change();
        }
    }

    /// Step the playback rate down one position (no-op at the bottom).
    pub fn decrease_speed(&mut self) {
        if self.session.speed.decrease() {
            self.after_speed_change();
        }
    }

    fn after_speed_change(&mut self) {
        let speed = &self.session.speed;
        self.emit(UiEvent::SpeedChanged {
            label: speed.label(),
            multiplier: speed.multiplier(),
            at_min: speed.at_min(),
            at_max: speed.at_max(),
        });

        // Live rate change: only while actually playing, never a
        // restart or position resync.
        if self.session.phase == PlaybackPhase::Playing {
            self.player.set_rate(speed.multiplier());
        }
    }

    // ── Speech lifecycle ───────────────────────────────────────────

    /// Run one speech session: synthesize, load, play.
    ///
    /// Any previous session is torn down synchronously before the new
    /// request goes out. Errors (other than empty input) restore the
    /// Idle control surface and are reported via status and alert
    /// before being returned.
    pub async fn speak(&mut self, text: &str) -> Result<(), SpeakError> {
        let text = text.trim();
        if text.is_empty() {
            self.emit_status(SpeakError::EmptyText.to_string(), StatusKind::Error);
            return Err(SpeakError::EmptyText);
        }

        // Tear down any prior audio session before the new request.
        self.player.stop();

        let language = self.session.effective_language();
        let speed = self.session.speed.multiplier();

        self.set_phase(PlaybackPhase::Requesting);
        self.emit_status("Generating speech...", StatusKind::Active);
        self.emit(UiEvent::Banner(Some(if language == language::AUTO_CODE {
            "Language: auto-detecting...".to_owned()
        } else {
            let selection = LanguageSelection::from_code(&language);
            format!("Language: {} ({language})", selection.label())
        })));

        let request = SynthesisRequest {
            text: text.to_owned(),
            language,
            speed,
        };
        let preview: String = request.text.chars().take(50).collect();
        tracing::debug!(
            preview,
            language = %request.language,
            speed = request.speed,
            "Sending synthesis request"
        );

        let result = self.backend.synthesize(&request).await;
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => return self.fail(e.into()),
        };

        self.apply_resolved_language(&outcome);
        self.load_and_play(&outcome).await
    }

    /// Update the selector and banner from the backend's resolved
    /// language metadata.
    fn apply_resolved_language(&mut self, outcome: &SynthesisOutcome) {
        if let Some(ref resolved) = outcome.resolved {
            self.session.detected = Some(resolved.clone());
            if language::is_selectable(&resolved.code) {
                self.select_language(
                    LanguageSelection::Code(resolved.code.clone()),
                    SelectionOrigin::Programmatic,
                );
            }
            self.emit(UiEvent::Banner(Some(format!(
                "Language: {} ({})",
                resolved.display_name, resolved.code
            ))));
        }
    }

    /// Fetch, decode, and start playing the synthesized audio.
    async fn load_and_play(&mut self, outcome: &SynthesisOutcome) -> Result<(), SpeakError> {
        self.set_phase(PlaybackPhase::LoadingAudio);
        self.emit_status("Loading audio...", StatusKind::Active);

        // Reset any previously staged clip before loading the new one.
        self.player.clear();

        // One ceiling bounds fetch plus decode. Decoding runs on a
        // blocking thread so the timeout can actually preempt the wait;
        // on expiry the decode may still finish in the background, but
        // its result is discarded.
        let backend = Arc::clone(&self.backend);
        let player = Arc::clone(&self.player);
        let resource = outcome.audio.clone();
        let ready = tokio::time::timeout(AUDIO_READY_TIMEOUT, async move {
            let bytes = backend.fetch_audio(&resource).await?;
            tokio::task::spawn_blocking(move || player.load(bytes))
                .await
                .map_err(|e| SpeakError::Media(format!("audio decode task failed: {e}")))?
                .map_err(SpeakError::from)
        })
        .await;

        let duration = match ready {
            Err(_elapsed) => {
                return self.fail(SpeakError::Media(
                    "Audio loading timeout - file may be empty or corrupted".to_owned(),
                ));
            }
            Ok(Err(e)) => return self.fail(e),
            Ok(Ok(duration)) => duration,
        };

        // The player already rejects empty clips; keep the invariant
        // locally too so Playing is unreachable with a zero duration.
        if duration.is_zero() {
            return self.fail(SpeakError::from(AudioPlayerError::EmptyAudio));
        }

        tracing::debug!(duration_ms = duration.as_millis(), "Audio ready");
        self.player.set_rate(self.session.speed.multiplier());

        match self.player.play() {
            Ok(()) => {
                self.set_phase(PlaybackPhase::Playing);
                let status = outcome.voice.as_ref().map_or_else(
                    || "Reading text...".to_owned(),
                    |voice| format!("Reading text... ({voice})"),
                );
                self.emit_status(status, StatusKind::Active);
                Ok(())
            }
            Err(AudioPlayerError::DeviceUnavailable(reason)) => {
                // Degraded, not fatal: keep the loaded clip, park in
                // Paused so the resume control doubles as the manual
                // start.
                tracing::warn!(reason = %reason, "Playback could not start, exposing manual controls");
                self.set_phase(PlaybackPhase::Paused);
                self.emit_status(
                    "Audio output unavailable - press resume to start playback",
                    StatusKind::Error,
                );
                Ok(())
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Halt playback, reset the position, and restore the Idle control
    /// surface. Valid from any state.
    pub fn stop(&mut self) {
        self.player.stop();
        self.set_phase(PlaybackPhase::Idle);
        self.emit_status("Stopped", StatusKind::Neutral);
    }

    /// Toggle between Playing and Paused. No-op when no audio is
    /// staged.
    pub fn toggle_pause(&mut self) {
        if !self.player.has_audio() {
            return;
        }

        match self.session.phase {
            PlaybackPhase::Playing => {
                self.player.pause();
                self.set_phase(PlaybackPhase::Paused);
                self.emit_status("Paused", StatusKind::Neutral);
            }
            PlaybackPhase::Paused => match self.player.resume() {
                Ok(()) => {
                    self.set_phase(PlaybackPhase::Playing);
                    self.emit_status("Reading text...", StatusKind::Active);
                }
                Err(AudioPlayerError::DeviceUnavailable(reason)) => {
                    tracing::warn!(reason = %reason, "Resume failed, output still unavailable");
                    self.emit_status(
                        "Audio output unavailable - press resume to retry",
                        StatusKind::Error,
                    );
                }
                Err(e) => {
                    let _ = self.fail(e.into());
                }
            },
            _ => {}
        }
    }

    /// Natural end of playback (from the completion watcher).
    fn on_playback_finished(&mut self) {
        if self.session.phase == PlaybackPhase::Playing {
            self.set_phase(PlaybackPhase::Idle);
            self.emit_status("Finished reading", StatusKind::Success);
        }
    }

    // ── Internal helpers ───────────────────────────────────────────

    /// Terminal failure for this operation: tear down, restore the
    /// Idle control surface, report, and hand the error back.
    fn fail(&mut self, err: SpeakError) -> Result<(), SpeakError> {
        self.player.stop();
        self.set_phase(PlaybackPhase::Idle);
        self.emit_status(format!("Error: {err}"), StatusKind::Error);
        self.emit(UiEvent::Alert(err.to_string()));
        self.emit(UiEvent::Banner(None));
        Err(err)
    }

    /// Transition phases and re-derive the control surface.
    fn set_phase(&mut self, phase: PlaybackPhase) {
        if self.session.phase != phase {
            tracing::debug!(old = ?self.session.phase, new = ?phase, "Session phase transition");
            self.session.phase = phase;
            self.emit(UiEvent::PhaseChanged(phase));
            self.emit(UiEvent::ControlsChanged(self.session.controls()));
        }
    }

    fn emit_status(&self, message: impl Into<String>, kind: StatusKind) {
        self.emit(UiEvent::Status {
            message: message.into(),
            kind,
        });
    }

    /// Emit a UI event (best-effort: a dropped receiver is logged and
    /// ignored).
    fn emit(&self, event: UiEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("UI event receiver dropped");
        }
    }
}
