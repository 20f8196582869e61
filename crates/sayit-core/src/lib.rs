#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    AUTO_CODE, ControlStates, DEFAULT_SPEED_INDEX, DetectedLanguage, LANGUAGES, LanguageSelection,
    PauseLabel, PlaybackPhase, SPEED_STEPS, SelectionOrigin, SessionState, SpeedSelector,
    display_name, is_selectable,
};
pub use error::SpeakError;
pub use events::{ControllerSignal, StatusKind, UiEvent};
pub use ports::{
    AudioPlayerError, AudioPlayerPort, AudioResource, PreferencesRepository, RepositoryError,
    SpeechBackendPort, SpeechPortError, SynthesisOutcome, SynthesisRequest,
};
pub use services::{
    AUDIO_READY_TIMEOUT, DETECTION_DEBOUNCE, DETECTION_MIN_CHARS, Debouncer, PreferencesService,
    SpeechController,
};
pub use settings::{DisplayPreferences, StoredPreferences};
