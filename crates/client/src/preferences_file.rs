//! JSON-file preferences store.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use costlens_core::preferences::{PreferencesError, PreferencesStore, ViewPreferences};

/// Stores every user's preferences in one JSON object keyed by user.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a crash never leaves a truncated file behind.
#[derive(Debug)]
pub struct JsonFilePreferencesStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePreferencesStore {
    /// Creates a store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, ViewPreferences>, PreferencesError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(PreferencesError::storage(format!(
                "reading {}: {err}",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl PreferencesStore for JsonFilePreferencesStore {
    async fn load(&self, user_key: &str) -> Result<Option<ViewPreferences>, PreferencesError> {
        Ok(self.read_all().await?.remove(user_key))
    }

    async fn save(&self, user_key: &str, preferences: &ViewPreferences) -> Result<(), PreferencesError> {
        let _guard = self.write_lock.lock().await;

        let mut all = match self.read_all().await {
            Err(PreferencesError::Serialization(err)) => {
                warn!(path = %self.path.display(), error = %err, "preferences file is corrupt, starting over");
                BTreeMap::new()
            }
            other => other?,
        };
        all.insert(user_key.to_string(), preferences.clone());
        let text = serde_json::to_string_pretty(&all)?;

        write_replacing(&self.path, &text).await?;

        debug!(user_key, path = %self.path.display(), "preferences saved");
        Ok(())
    }
}

/// Writes `text` to a sibling temporary file and renames it over `path`.
/// The temporary file is removed again if the rename fails.
async fn write_replacing(path: &Path, text: &str) -> Result<(), PreferencesError> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, text)
        .await
        .map_err(|e| PreferencesError::storage(format!("writing {}: {e}", tmp.display())))?;

    if let Err(err) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(PreferencesError::storage(format!("replacing {}: {err}", path.display())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use costlens_core::calendar::YearMonth;
    use costlens_core::ranking::EntitySelection;
    use costlens_shared::types::ViewMode;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("costlens-prefs-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_missing_file_loads_nothing() {
        let store = JsonFilePreferencesStore::new(scratch_path());
        assert_eq!(store.load("default").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_keeps_other_users() {
        let path = scratch_path();
        let store = JsonFilePreferencesStore::new(&path);
        let mut ana = ViewPreferences {
            sector_selection: EntitySelection::from_names(["TI", "RH"]),
            ..ViewPreferences::default()
        };
        ana.set_filters(ViewMode::Daily, YearMonth::new(2024, 5).unwrap());

        store.save("ana", &ana).await.unwrap();
        store.save("bruno", &ViewPreferences::default()).await.unwrap();

        let reopened = JsonFilePreferencesStore::new(&path);
        assert_eq!(reopened.load("ana").await.unwrap(), Some(ana));
        assert_eq!(reopened.load("bruno").await.unwrap(), Some(ViewPreferences::default()));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let path = scratch_path();
        tokio::fs::write(&path, "{not json").await.unwrap();

        let err = JsonFilePreferencesStore::new(&path).load("ana").await.unwrap_err();
        assert!(matches!(err, PreferencesError::Serialization(_)));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_replaces_corrupt_file() {
        let path = scratch_path();
        tokio::fs::write(&path, "{not json").await.unwrap();
        let store = JsonFilePreferencesStore::new(&path);

        let prefs = ViewPreferences {
            mode: ViewMode::Monthly,
            ..ViewPreferences::default()
        };
        store.save("ana", &prefs).await.unwrap();

        assert_eq!(store.load("ana").await.unwrap(), Some(prefs));
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_temp_file() {
        // a file cannot be renamed over a directory
        let path = scratch_path();
        tokio::fs::create_dir(&path).await.unwrap();

        let err = write_replacing(&path, "{}").await.unwrap_err();

        assert!(matches!(err, PreferencesError::Storage(_)));
        assert!(!path.with_extension("json.tmp").exists());
        tokio::fs::remove_dir(&path).await.unwrap();
    }
}
