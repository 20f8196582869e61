//! JSON-file preferences store.
//!
//! Persists the two display preferences under the platform config
//! directory. A missing file (or a missing key) is "never set", not an
//! error; the store only fails on real IO problems, and even those are
//! downgraded to defaults by the preferences service.

use std::path::PathBuf;

use async_trait::async_trait;
use sayit_core::{PreferencesRepository, RepositoryError, StoredPreferences};

use crate::error::CliError;

/// File-backed implementation of [`PreferencesRepository`].
pub struct JsonPreferencesStore {
    path: PathBuf,
}

impl JsonPreferencesStore {
    /// Store at an explicit path (used by tests).
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform default location
    /// (`<config_dir>/sayit/preferences.json`).
    pub fn at_default_location() -> Result<Self, CliError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Io("no platform config directory".to_owned()))?;
        Ok(Self::new(config_dir.join("sayit").join("preferences.json")))
    }

    /// Where this store persists to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl PreferencesRepository for JsonPreferencesStore {
    async fn load(&self) -> Result<StoredPreferences, RepositoryError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredPreferences::default());
            }
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };

        serde_json::from_str(&raw).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    async fn save(&self, preferences: &StoredPreferences) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        }

        let raw = serde_json::to_string_pretty(preferences)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_unset_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferencesStore::new(dir.path().join("preferences.json"));

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, StoredPreferences::default());
    }

    #[tokio::test]
    async fn round_trips_both_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferencesStore::new(dir.path().join("nested").join("preferences.json"));

        let preferences = StoredPreferences {
            dark_mode: Some(true),
            compact_layout: Some(false),
        };
        store.save(&preferences).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, preferences);
    }

    #[tokio::test]
    async fn each_preference_persists_independently() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferencesStore::new(dir.path().join("preferences.json"));

        store
            .save(&StoredPreferences {
                dark_mode: Some(true),
                compact_layout: None,
            })
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.dark_mode, Some(true));
        assert_eq!(loaded.compact_layout, None);
    }

    #[tokio::test]
    async fn corrupt_file_reports_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json at all").unwrap();
        let store = JsonPreferencesStore::new(path);

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
