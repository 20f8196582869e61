//! Events emitted by the controller for frontends to render, and the
//! signal channel that re-enters the controller.

use serde::{Deserialize, Serialize};

use crate::domain::{ControlStates, LanguageSelection, PlaybackPhase, SelectionOrigin};

/// Visual category of a status message, mirrored by the frontend's
/// palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatusKind {
    /// No particular emphasis ("Stopped", "Paused").
    #[default]
    Neutral,

    /// Work in progress ("Generating speech...").
    Active,

    /// A session finished normally.
    Success,

    /// Something went wrong.
    Error,
}

/// Events emitted by the [`SpeechController`](crate::services::SpeechController)
/// to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The session phase changed.
    PhaseChanged(PlaybackPhase),

    /// Control enablement changed (always follows a phase change).
    ControlsChanged(ControlStates),

    /// Status line update.
    Status {
        message: String,
        kind: StatusKind,
    },

    /// A blocking notification the frontend should foreground (the
    /// status line carries the same message).
    Alert(String),

    /// The language banner line; `None` clears it.
    Banner(Option<String>),

    /// The language selector value changed. `origin` tells a frontend
    /// whether the user drove the change or the controller did
    /// (detection result, resolved language) so the manual-change
    /// notification path does not re-fire.
    SelectionChanged {
        selection: LanguageSelection,
        origin: SelectionOrigin,
    },

    /// The speed selector moved.
    SpeedChanged {
        label: String,
        multiplier: f32,
        at_min: bool,
        at_max: bool,
    },

    /// Live character count of the input text.
    CharCount(usize),
}

/// Deferred work re-entering the controller. Produced by the debounce
/// timer and the playback completion watcher; consumed by the
/// frontend's event loop, which hands each signal back to the
/// controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerSignal {
    /// The detection quiet period elapsed with this text pending.
    DetectionElapsed {
        text: String,
    },

    /// Playback drained naturally (never fired for `stop()`).
    PlaybackFinished,
}
