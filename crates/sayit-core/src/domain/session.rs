//! Playback session state machine.
//!
//! One speech session moves through:
//!
//! ```text
//!   Idle → Requesting → LoadingAudio → Playing ⇄ Paused
//!    ▲                                    │
//!    └──────── finish / stop / error ─────┘
//! ```
//!
//! Control enablement is always derived from the current phase, never
//! stored on its own, so the UI cannot drift out of sync with the state
//! machine.

use serde::{Deserialize, Serialize};

use super::language::{DetectedLanguage, LanguageSelection};
use super::speed::SpeedSelector;

/// Current phase of the speech session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackPhase {
    /// Nothing in flight; all inputs available.
    #[default]
    Idle,

    /// Synthesis request sent, awaiting the backend response.
    Requesting,

    /// Audio resource being fetched and decoded.
    LoadingAudio,

    /// Audio playing.
    Playing,

    /// Audio paused (explicitly, or parked here when the output device
    /// refused to start playback).
    Paused,
}

/// Label for the pause/resume control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseLabel {
    Pause,
    Resume,
}

/// Which controls are enabled, derived from the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlStates {
    /// Speak control (and the text input shortcut).
    pub speak: bool,

    /// Stop control.
    pub stop: bool,

    /// Pause/resume control.
    pub pause: bool,

    /// Language selector. Disabled for the whole session so the
    /// language cannot change mid-synthesis.
    pub language: bool,

    /// Current label of the pause/resume control.
    pub pause_label: PauseLabel,
}

impl ControlStates {
    /// Derive the control surface for a phase.
    #[must_use]
    pub const fn for_phase(phase: PlaybackPhase) -> Self {
        let busy = !matches!(phase, PlaybackPhase::Idle);
        Self {
            speak: !busy,
            stop: busy,
            pause: busy,
            language: !busy,
            pause_label: if matches!(phase, PlaybackPhase::Paused) {
                PauseLabel::Resume
            } else {
                PauseLabel::Pause
            },
        }
    }
}

/// The one owned state object for a speech session.
///
/// Everything the controller mutates lives here; there are no
/// free-floating flags. Frontends receive snapshots of it through
/// events.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current phase.
    pub phase: PlaybackPhase,

    /// Authoritative language choice.
    pub selection: LanguageSelection,

    /// Last successful detection result, consumed at speak time when
    /// the selection is auto.
    pub detected: Option<DetectedLanguage>,

    /// Discrete playback-rate position.
    pub speed: SpeedSelector,
}

impl SessionState {
    /// Fresh idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Control surface for the current phase.
    #[must_use]
    pub const fn controls(&self) -> ControlStates {
        ControlStates::for_phase(self.phase)
    }

    /// The language code to carry in a synthesis request: the explicit
    /// selection when one is set, else the last detected code, else the
    /// literal auto sentinel (server-side detection).
    #[must_use]
    pub fn effective_language(&self) -> String {
        match &self.selection {
            LanguageSelection::Code(code) => code.clone(),
            LanguageSelection::Auto => self
                .detected
                .as_ref()
                .map_or_else(|| LanguageSelection::Auto.as_code().to_owned(), |d| d.code.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_controls() {
        let controls = ControlStates::for_phase(PlaybackPhase::Idle);
        assert!(controls.speak);
        assert!(!controls.stop);
        assert!(!controls.pause);
        assert!(controls.language);
        assert_eq!(controls.pause_label, PauseLabel::Pause);
    }

    #[test]
    fn busy_phases_disable_speak_and_language() {
        for phase in [
            PlaybackPhase::Requesting,
            PlaybackPhase::LoadingAudio,
            PlaybackPhase::Playing,
            PlaybackPhase::Paused,
        ] {
            let controls = ControlStates::for_phase(phase);
            assert!(!controls.speak, "{phase:?}");
            assert!(controls.stop, "{phase:?}");
            assert!(controls.pause, "{phase:?}");
            assert!(!controls.language, "{phase:?}");
        }
    }

    #[test]
    fn paused_relabels_control_to_resume() {
        assert_eq!(
            ControlStates::for_phase(PlaybackPhase::Paused).pause_label,
            PauseLabel::Resume
        );
        assert_eq!(
            ControlStates::for_phase(PlaybackPhase::Playing).pause_label,
            PauseLabel::Pause
        );
    }

    #[test]
    fn effective_language_prefers_explicit_selection() {
        let mut session = SessionState::new();
        session.selection = LanguageSelection::Code("de".to_owned());
        session.detected = Some(DetectedLanguage {
            code: "fr".to_owned(),
            display_name: "French".to_owned(),
        });
        assert_eq!(session.effective_language(), "de");
    }

    #[test]
    fn effective_language_falls_back_to_detected_then_auto() {
        let mut session = SessionState::new();
        assert_eq!(session.effective_language(), "auto");

        session.detected = Some(DetectedLanguage {
            code: "hi".to_owned(),
            display_name: "Hindi".to_owned(),
        });
        assert_eq!(session.effective_language(), "hi");
    }
}
