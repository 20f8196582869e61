//! Display preference types.
//!
//! Two independent booleans (dark mode, compact layout), each persisted
//! on its own. `None` means "never explicitly set": dark mode then
//! follows a system-level signal supplied by the frontend, compact
//! layout defaults to off. Storage absence is a default, never a
//! failure.

use serde::{Deserialize, Serialize};

/// Preferences as persisted: `None` = never explicitly set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredPreferences {
    /// Dark display mode.
    pub dark_mode: Option<bool>,

    /// Compact layout.
    pub compact_layout: Option<bool>,
}

impl StoredPreferences {
    /// Resolve to effective values, deferring an unset dark mode to the
    /// system signal.
    #[must_use]
    pub const fn effective(&self, system_prefers_dark: bool) -> DisplayPreferences {
        DisplayPreferences {
            dark_mode: match self.dark_mode {
                Some(explicit) => explicit,
                None => system_prefers_dark,
            },
            compact_layout: match self.compact_layout {
                Some(explicit) => explicit,
                None => false,
            },
        }
    }
}

/// Effective display preferences applied to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    /// Dark display mode on.
    pub dark_mode: bool,

    /// Compact layout on.
    pub compact_layout: bool,
}

impl DisplayPreferences {
    /// Indicator icon name for the dark-mode toggle (shows the mode you
    /// would switch to).
    #[must_use]
    pub const fn theme_indicator(&self) -> &'static str {
        if self.dark_mode { "sun" } else { "moon" }
    }

    /// Indicator icon name for the layout toggle.
    #[must_use]
    pub const fn layout_indicator(&self) -> &'static str {
        if self.compact_layout { "expand" } else { "compress" }
    }
}
