use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Favorites serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored value under {key} is not valid UTF-8")]
    InvalidEncoding { key: String },

    #[error("Unsupported favorites format version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
