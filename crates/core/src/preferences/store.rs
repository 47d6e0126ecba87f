//! Preferences persistence port.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::warn;

use super::error::PreferencesError;
use super::types::ViewPreferences;

/// Storage of [`ViewPreferences`] per user or session key.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    /// Reads the preferences stored under `user_key`, if any.
    async fn load(&self, user_key: &str) -> Result<Option<ViewPreferences>, PreferencesError>;

    /// Writes the preferences under `user_key`, replacing any previous value.
    async fn save(&self, user_key: &str, preferences: &ViewPreferences) -> Result<(), PreferencesError>;
}

/// Loads preferences, degrading to defaults when missing or unreadable.
pub async fn load_or_default(store: &dyn PreferencesStore, user_key: &str) -> ViewPreferences {
    match store.load(user_key).await {
        Ok(Some(preferences)) => preferences,
        Ok(None) => ViewPreferences::default(),
        Err(err) => {
            warn!(user_key, error = %err, "could not load preferences, using defaults");
            ViewPreferences::default()
        }
    }
}

/// Process-local store, for tests and single-run tools.
#[derive(Debug, Default)]
pub struct InMemoryPreferencesStore {
    entries: RwLock<HashMap<String, ViewPreferences>>,
}

impl InMemoryPreferencesStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferencesStore for InMemoryPreferencesStore {
    async fn load(&self, user_key: &str) -> Result<Option<ViewPreferences>, PreferencesError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| PreferencesError::storage(e.to_string()))?;
        Ok(entries.get(user_key).cloned())
    }

    async fn save(&self, user_key: &str, preferences: &ViewPreferences) -> Result<(), PreferencesError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| PreferencesError::storage(e.to_string()))?;
        entries.insert(user_key.to_string(), preferences.clone());
        Ok(())
    }
}
