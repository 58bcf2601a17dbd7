use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{WebsearchError, WebsearchResult};

const ICONS_DIR: &str = "icons";
const TRASH_DIR: &str = "trash";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the engine list, imported icons and discarded icons.
    pub directory: String,
    pub engines_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// `fallback` value for stored records (and seeds) that don't carry one.
    pub legacy_fallback_default: bool,
    pub max_results: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: "~/.config/nova/websearch".to_string(),
            engines_file: "engines.json".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            legacy_fallback_default: true,
            max_results: 8,
        }
    }
}

impl StorageConfig {
    /// Tilde-expanded storage directory
    pub fn directory(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.directory).as_ref())
    }

    pub fn engines_path(&self) -> PathBuf {
        self.directory().join(&self.engines_file)
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.directory().join(ICONS_DIR)
    }

    pub fn trash_dir(&self) -> PathBuf {
        self.directory().join(TRASH_DIR)
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("nova")
            .join("websearch.toml")
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`. Unreadable or malformed files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match Self::read(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to load config {}: {}", path.display(), e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    fn read(path: &Path) -> WebsearchResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.behavior.max_results = self.behavior.max_results.clamp(1, 50);

        if self.storage.engines_file.trim().is_empty() {
            self.storage.engines_file = StorageConfig::default().engines_file;
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> WebsearchResult<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> WebsearchResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WebsearchError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| WebsearchError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.behavior.legacy_fallback_default);
        assert_eq!(config.behavior.max_results, 8);
        assert_eq!(config.storage.engines_file, "engines.json");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [behavior]
            legacy_fallback_default = false
            "#,
        )
        .unwrap();

        assert!(!config.behavior.legacy_fallback_default);
        assert_eq!(config.behavior.max_results, 8);
        assert_eq!(config.storage.directory, "~/.config/nova/websearch");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config.behavior.max_results, 8);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("websearch.toml");
        fs::write(&path, "this is [not toml").unwrap();

        let config = Config::load_from(&path);
        assert!(config.behavior.legacy_fallback_default);
    }

    #[test]
    fn test_validate_clamps_max_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("websearch.toml");
        fs::write(&path, "[behavior]\nmax_results = 500\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.behavior.max_results, 50);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("websearch.toml");

        let mut config = Config::default();
        config.storage.directory = dir.path().display().to_string();
        config.behavior.max_results = 3;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.behavior.max_results, 3);
        assert_eq!(loaded.storage.engines_path(), dir.path().join("engines.json"));
        assert_eq!(loaded.storage.trash_dir(), dir.path().join("trash"));
    }
}
