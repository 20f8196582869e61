//! Pure domain types with no infrastructure dependencies.

pub mod language;
pub mod session;
pub mod speed;

pub use language::{
    AUTO_CODE, DetectedLanguage, LANGUAGES, LanguageSelection, SelectionOrigin, display_name,
    is_selectable,
};
pub use session::{ControlStates, PauseLabel, PlaybackPhase, SessionState};
pub use speed::{DEFAULT_SPEED_INDEX, SPEED_STEPS, SpeedSelector};
