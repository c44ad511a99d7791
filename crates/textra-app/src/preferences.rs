use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use textra_config::{Preferences, SettingsFile};

/// Where the language pair chosen by the user lives
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Stored preferences, defaults when nothing was saved yet
    async fn load(&self) -> anyhow::Result<Preferences>;

    async fn save(&self, preferences: &Preferences) -> anyhow::Result<()>;
}

/// JSON file holding a `settings` namespace
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn load(&self) -> anyhow::Result<Preferences> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No preferences at {}, using defaults", self.path.display());
                return Ok(Preferences::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let file: SettingsFile = serde_json::from_str(&data)
            .with_context(|| format!("Invalid preferences file {}", self.path.display()))?;
        Ok(file.settings)
    }

    async fn save(&self, preferences: &Preferences) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = SettingsFile {
            settings: preferences.clone(),
        };
        tokio::fs::write(&self.path, serde_json::to_string_pretty(&file)?)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::info!(
            "Saved preferences {} -> {}",
            preferences.input_lang,
            preferences.output_lang
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferenceStore::new(dir.path().join("preferences.json"));

        let prefs = store.load().await.unwrap();
        assert_eq!(prefs.input_lang, "en");
        assert_eq!(prefs.output_lang, "vi");
    }

    #[tokio::test]
    async fn saved_preferences_are_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferenceStore::new(dir.path().join("nested").join("preferences.json"));
        let prefs = Preferences {
            input_lang: "ja".to_string(),
            output_lang: "fr-ca".to_string(),
        };

        store.save(&prefs).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"inputLang\": \"ja\""));
        assert_eq!(store.load().await.unwrap(), prefs);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(JsonPreferenceStore::new(path).load().await.is_err());
    }
}
