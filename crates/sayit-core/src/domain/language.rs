//! Language catalog and selection types.
//!
//! The catalog mirrors the languages the speech service can synthesize.
//! A selection is either a concrete catalog code or the `auto` sentinel,
//! which defers language choice to server-side detection at speak time.

use serde::{Deserialize, Serialize};

/// Wire value of the auto-detect sentinel.
pub const AUTO_CODE: &str = "auto";

/// Selectable languages: `(code, display name)` pairs.
///
/// Order matters only for presentation (the frontend lists and cycles
/// through these in catalog order).
pub const LANGUAGES: [(&str, &str); 21] = [
    ("en", "English"),
    ("ml", "Malayalam"),
    ("hi", "Hindi"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("kn", "Kannada"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("bn", "Bengali"),
    ("gu", "Gujarati"),
    ("mr", "Marathi"),
    ("pa", "Punjabi"),
    ("ur", "Urdu"),
];

/// Look up the display name for a catalog code.
#[must_use]
pub fn display_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Whether a code is one of the selectable catalog languages.
#[must_use]
pub fn is_selectable(code: &str) -> bool {
    display_name(code).is_some()
}

// ── Selection ──────────────────────────────────────────────────────

/// The authoritative language choice for the next speech request.
///
/// Exactly one value holds at a time: either the user (or a detection
/// result) picked a concrete catalog code, or the `Auto` sentinel defers
/// to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LanguageSelection {
    /// Defer to server-side detection at speak time.
    #[default]
    Auto,

    /// A concrete catalog language code (e.g. `fr`).
    Code(String),
}

impl LanguageSelection {
    /// Build a selection from a raw code; `auto` maps to the sentinel.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code == AUTO_CODE {
            Self::Auto
        } else {
            Self::Code(code.to_owned())
        }
    }

    /// The wire code for this selection (`auto` for the sentinel).
    #[must_use]
    pub fn as_code(&self) -> &str {
        match self {
            Self::Auto => AUTO_CODE,
            Self::Code(code) => code,
        }
    }

    /// Human-readable label (catalog display name, or the raw code for
    /// off-catalog values).
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Auto => "Auto-detect".to_owned(),
            Self::Code(code) => display_name(code).map_or_else(|| code.clone(), str::to_owned),
        }
    }

    /// Whether this is the auto sentinel.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Who initiated a selection change.
///
/// Detection results and resolved-language updates from the backend are
/// `Programmatic`; only `User` changes fire the "manual selection
/// changed" notification path. Modelling the origin explicitly replaces
/// the re-entrancy boolean the equivalent browser code would toggle
/// around the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOrigin {
    /// The user changed the selector.
    User,

    /// The controller changed the selector (detection result, resolved
    /// language from a synthesis response, or a forced reset to auto).
    Programmatic,
}

/// A language inferred by the detection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    /// Language code as returned by the backend (not necessarily in the
    /// catalog).
    pub code: String,

    /// Display name as returned by the backend.
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup() {
        assert_eq!(display_name("fr"), Some("French"));
        assert_eq!(display_name("ml"), Some("Malayalam"));
        assert_eq!(display_name("xx"), None);
        assert!(is_selectable("en"));
        assert!(!is_selectable("auto"));
    }

    #[test]
    fn selection_from_code() {
        assert_eq!(LanguageSelection::from_code("auto"), LanguageSelection::Auto);
        assert_eq!(
            LanguageSelection::from_code("hi"),
            LanguageSelection::Code("hi".to_owned())
        );
    }

    #[test]
    fn selection_codes_round_trip() {
        assert_eq!(LanguageSelection::Auto.as_code(), "auto");
        assert_eq!(LanguageSelection::Code("ta".to_owned()).as_code(), "ta");
    }

    #[test]
    fn selection_labels() {
        assert_eq!(LanguageSelection::Auto.label(), "Auto-detect");
        assert_eq!(LanguageSelection::Code("es".to_owned()).label(), "Spanish");
        // Off-catalog codes fall back to the raw code.
        assert_eq!(LanguageSelection::Code("tlh".to_owned()).label(), "tlh");
    }
}
