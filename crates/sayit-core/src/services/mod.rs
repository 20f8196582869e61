//! Core services - the controller orchestrating speech sessions, the
//! debounce timer, and the preferences service.

pub mod controller;
pub mod debounce;
pub mod preferences;

pub use controller::{
    AUDIO_READY_TIMEOUT, DETECTION_DEBOUNCE, DETECTION_MIN_CHARS, SpeechController,
};
pub use debounce::Debouncer;
pub use preferences::PreferencesService;
