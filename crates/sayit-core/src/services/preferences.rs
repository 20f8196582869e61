//! Preferences service - loads, applies, and toggles display
//! preferences.

use std::sync::Arc;

use crate::ports::PreferencesRepository;
use crate::settings::{DisplayPreferences, StoredPreferences};

/// Service for the two display preferences.
///
/// Storage problems are never surfaced: a failed load falls back to
/// defaults and a failed save keeps the in-memory value, both logged at
/// `warn`.
pub struct PreferencesService {
    repo: Arc<dyn PreferencesRepository>,
    stored: StoredPreferences,
    system_prefers_dark: bool,
}

impl PreferencesService {
    /// Load stored preferences and resolve them against the system
    /// dark-mode signal.
    pub async fn load(repo: Arc<dyn PreferencesRepository>, system_prefers_dark: bool) -> Self {
        let stored = match repo.load().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load preferences, using defaults");
                StoredPreferences::default()
            }
        };

        Self {
            repo,
            stored,
            system_prefers_dark,
        }
    }

    /// Current effective preferences.
    #[must_use]
    pub const fn current(&self) -> DisplayPreferences {
        self.stored.effective(self.system_prefers_dark)
    }

    /// Flip dark mode, persist the explicit value, and return the new
    /// effective preferences.
    pub async fn toggle_dark_mode(&mut self) -> DisplayPreferences {
        let next = !self.current().dark_mode;
        self.stored.dark_mode = Some(next);
        self.persist().await;
        self.current()
    }

    /// Flip compact layout, persist the explicit value, and return the
    /// new effective preferences.
    pub async fn toggle_compact(&mut self) -> DisplayPreferences {
        let next = !self.current().compact_layout;
        self.stored.compact_layout = Some(next);
        self.persist().await;
        self.current()
    }

    async fn persist(&self) {
        if let Err(e) = self.repo.save(&self.stored).await {
            tracing::warn!(error = %e, "Failed to persist preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RepositoryError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPreferencesRepo {
        stored: Mutex<StoredPreferences>,
        fail_loads: bool,
    }

    impl MockPreferencesRepo {
        fn new() -> Self {
            Self {
                stored: Mutex::new(StoredPreferences::default()),
                fail_loads: false,
            }
        }
    }

    #[async_trait]
    impl PreferencesRepository for MockPreferencesRepo {
        async fn load(&self) -> Result<StoredPreferences, RepositoryError> {
            if self.fail_loads {
                return Err(RepositoryError::Storage("boom".to_owned()));
            }
            Ok(*self.stored.lock().unwrap())
        }

        async fn save(&self, preferences: &StoredPreferences) -> Result<(), RepositoryError> {
            *self.stored.lock().unwrap() = *preferences;
            Ok(())
        }
    }

    #[tokio::test]
    async fn first_load_follows_system_signal() {
        let repo = Arc::new(MockPreferencesRepo::new());
        let service = PreferencesService::load(repo, true).await;
        assert!(service.current().dark_mode);
        assert!(!service.current().compact_layout);
    }

    #[tokio::test]
    async fn toggle_persists_explicit_value() {
        let repo = Arc::new(MockPreferencesRepo::new());
        let mut service = PreferencesService::load(Arc::clone(&repo) as _, true).await;

        // System says dark; toggling turns it off explicitly.
        let prefs = service.toggle_dark_mode().await;
        assert!(!prefs.dark_mode);
        assert_eq!(repo.stored.lock().unwrap().dark_mode, Some(false));

        let prefs = service.toggle_compact().await;
        assert!(prefs.compact_layout);
        assert_eq!(repo.stored.lock().unwrap().compact_layout, Some(true));
    }

    #[tokio::test]
    async fn failed_load_falls_back_to_defaults() {
        let repo = Arc::new(MockPreferencesRepo {
            stored: Mutex::new(StoredPreferences {
                dark_mode: Some(true),
                compact_layout: Some(true),
            }),
            fail_loads: true,
        });
        let service = PreferencesService::load(repo, false).await;
        assert!(!service.current().dark_mode);
        assert!(!service.current().compact_layout);
    }
}
