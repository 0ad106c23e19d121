use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::paths::PathManager;

/// Key the browser client used in local storage; kept so exported data lines up
pub const DEFAULT_STORAGE_KEY: &str = "watchindex_favorites";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("storage.key cannot be empty")]
    EmptyStorageKey,

    #[error("storage.key must not contain path separators or '..': {0}")]
    InvalidStorageKey(String),

    #[error("Invalid logging.level: {0}. Use one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// One JSON file per key under `storage.dir`
    #[default]
    File,
    /// Process-local map; favorites are lost on exit
    Memory,
    /// Never persists
    None,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// Overrides the default `<data_dir>/storage`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Unset means JSON whenever stdout is not a terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    /// Relative paths live under the log directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            key: default_storage_key(),
            dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl StorageConfig {
    pub fn resolve_dir(&self, paths: &PathManager) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| paths.storage_dir())
    }
}

impl LoggingConfig {
    pub fn json_enabled(&self) -> bool {
        self.json.unwrap_or_else(default_json_logging)
    }

    pub fn resolve_file(&self, paths: &PathManager) -> Option<PathBuf> {
        self.file.as_ref().map(|file| {
            if file.is_absolute() {
                file.clone()
            } else {
                paths.log_dir().join(file)
            }
        })
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if there is one, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = self.storage.key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        // The file backend maps keys straight onto file names
        if key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(ConfigError::InvalidStorageKey(self.storage.key.clone()));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            storage: StorageConfig {
                backend: StorageBackendKind::Memory,
                key: "my_favorites".to_string(),
                dir: Some(PathBuf::from("/var/lib/watchindex")),
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: Some(true),
                file: None,
            },
        };

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.storage.backend, StorageBackendKind::Memory);
        assert_eq!(loaded.storage.key, "my_favorites");
        assert_eq!(loaded.storage.dir, Some(PathBuf::from("/var/lib/watchindex")));
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.logging.json, Some(true));
        assert!(loaded.logging.json_enabled());
    }

    #[test]
    fn test_default_config_leaves_json_logging_unset() {
        let file = NamedTempFile::new().unwrap();
        Config::default().save_to_file(file.path()).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(!written.contains("json"));
        assert_eq!(Config::load_from_file(file.path()).unwrap().logging.json, None);

        let explicit: Config = toml::from_str("[logging]\njson = false\n").unwrap();
        assert!(!explicit.logging.json_enabled());
    }

    #[test]
    fn test_resolve_log_file() {
        let paths = PathManager::with_base(PathBuf::from("/base"));
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.resolve_file(&paths), None);

        logging.file = Some(PathBuf::from("watchindex.log"));
        assert_eq!(logging.resolve_file(&paths), Some(PathBuf::from("/base/logs/watchindex.log")));

        logging.file = Some(PathBuf::from("/var/log/watchindex.log"));
        assert_eq!(logging.resolve_file(&paths), Some(PathBuf::from("/var/log/watchindex.log")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[storage]\nbackend = \"none\"\n").unwrap();
        assert_eq!(loaded.storage.backend, StorageBackendKind::None);
        assert_eq!(loaded.storage.key, DEFAULT_STORAGE_KEY);
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.storage.backend, StorageBackendKind::File);
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        config.storage.key = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyStorageKey));

        config.storage.key = "../escape".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidStorageKey(_))));

        config.storage.key = DEFAULT_STORAGE_KEY.to_string();
        config.logging.level = "loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLogLevel(_))));

        config.logging.level = "WARN".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_storage_dir() {
        let paths = PathManager::with_base(PathBuf::from("/base"));
        let mut storage = StorageConfig::default();
        assert_eq!(storage.resolve_dir(&paths), PathBuf::from("/base/data/storage"));
        storage.dir = Some(PathBuf::from("/elsewhere"));
        assert_eq!(storage.resolve_dir(&paths), PathBuf::from("/elsewhere"));
    }
}
