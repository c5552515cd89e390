//! Settings persistence.
//!
//! Settings are stored as TOML in the user's config directory. A missing
//! file yields the defaults.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use cal_model::{OrgUnitMapping, Settings};

use crate::client::RestClient;
use crate::error::{IngestError, Result};
use crate::sources::ConfigSource;

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location.
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "CourseActivityLoader", "cal")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings.
    ///
    /// Files written by older versions kept the rules as a list; those are
    /// replaced by the defaults.
    pub fn load(&self) -> Result<Settings> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(error) => return Err(self.error(error)),
        };

        let table: toml::Table = toml::from_str(&content).map_err(|e| self.error(e))?;
        let legacy = ["mapping_rules", "activityMapping"]
            .iter()
            .any(|key| table.get(*key).is_some_and(toml::Value::is_array));
        if table.is_empty() || legacy {
            tracing::warn!(
                path = %self.path.display(),
                "settings use an old format, using defaults"
            );
            return Ok(Settings::default());
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|e| self.error(e))
    }

    /// Save settings, creating the parent directory as needed.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        let content = toml::to_string_pretty(settings).map_err(|e| self.error(e))?;
        std::fs::write(&self.path, content).map_err(|e| self.error(e))
    }

    fn error(&self, error: impl std::fmt::Display) -> IngestError {
        IngestError::Settings {
            path: self.path.clone(),
            message: error.to_string(),
        }
    }
}

/// Settings from the local store, mapping tables from the service.
#[derive(Debug, Clone)]
pub struct StoredConfig {
    store: SettingsStore,
    client: RestClient,
}

impl StoredConfig {
    pub fn new(store: SettingsStore, client: RestClient) -> Self {
        Self { store, client }
    }
}

#[async_trait]
impl ConfigSource for StoredConfig {
    async fn settings(&self) -> Result<Settings> {
        self.store.load()
    }

    async fn mapping_table(&self, name: &str) -> Result<OrgUnitMapping> {
        self.client.mapping_table(name).await
    }
}

#[cfg(test)]
mod tests {
    use cal_model::MappingRule;

    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load_keeps_rules() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.toml"));
        let mut settings = Settings {
            language: "en".to_string(),
            ..Settings::default()
        };
        settings.insert_rule(MappingRule {
            name: "Teaching".to_string(),
            target_org_unit: "OU1".to_string(),
            course_term: "AUTUMN".to_string(),
            course_status: "ALL".to_string(),
            ..MappingRule::default()
        });
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn list_shaped_rules_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "language = \"en\"\n\n[[mapping_rules]]\nname = \"Old\"\n",
        )
        .unwrap();
        let settings = SettingsStore::new(&path).load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn unreadable_toml_is_a_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "language = ").unwrap();
        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, IngestError::Settings { .. }));
    }
}
