//! Preferences errors.

use thiserror::Error;

/// Errors reading or writing preferences.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// The backing store failed.
    #[error("preferences storage error: {0}")]
    Storage(String),

    /// Stored preferences could not be encoded or decoded.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PreferencesError {
    /// Create a storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
