pub mod config;
pub mod paths;

pub use config::{Config, ConfigError, LoggingConfig, StorageBackendKind, StorageConfig, DEFAULT_STORAGE_KEY};
pub use paths::{PathManager, container_base_path};
