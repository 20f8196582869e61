//! Preferences repository trait definition.
//!
//! This port defines the interface for display preference persistence.
//! Implementations handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::settings::StoredPreferences;

/// Repository for display preference persistence.
///
/// # Design Rules
///
/// - Works with the domain `StoredPreferences` type directly
/// - A missing store is `Ok(StoredPreferences::default())`, not an error
/// - The implementation handles serialization internally
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Load stored preferences. Absent storage yields the default
    /// (everything unset).
    async fn load(&self) -> Result<StoredPreferences, RepositoryError>;

    /// Persist preferences.
    async fn save(&self, preferences: &StoredPreferences) -> Result<(), RepositoryError>;
}
