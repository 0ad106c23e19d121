use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use watchindex_models::FavoriteItem;
use crate::backend::KeyValueBackend;
use crate::error::StorageError;

/// Version written into the persisted envelope
pub const FORMAT_VERSION: u32 = 1;

/// Where the favorites store reads its initial state and writes every change
pub trait FavoritesPersistence {
    /// Best-effort load. Missing or unreadable data comes back as an empty list.
    fn load(&mut self) -> Vec<FavoriteItem>;

    /// Overwrite the persisted collection with `items`
    fn save(&mut self, items: &[FavoriteItem]) -> Result<(), StorageError>;
}

impl<P: FavoritesPersistence + ?Sized> FavoritesPersistence for Box<P> {
    fn load(&mut self) -> Vec<FavoriteItem> {
        (**self).load()
    }

    fn save(&mut self, items: &[FavoriteItem]) -> Result<(), StorageError> {
        (**self).save(items)
    }
}

/// Persistence that keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersistence;

impl FavoritesPersistence for NoopPersistence {
    fn load(&mut self) -> Vec<FavoriteItem> {
        Vec::new()
    }

    fn save(&mut self, _items: &[FavoriteItem]) -> Result<(), StorageError> {
        Ok(())
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    items: &'a [FavoriteItem],
}

/// Accepted on-disk shapes: the versioned envelope, or the bare array the
/// browser client wrote to local storage
#[derive(Deserialize)]
#[serde(untagged)]
enum Persisted {
    Envelope {
        version: u32,
        #[serde(default)]
        saved_at: Option<DateTime<Utc>>,
        items: Vec<FavoriteItem>,
    },
    Legacy(Vec<FavoriteItem>),
}

/// Mirrors the favorites collection as one JSON document under a fixed key
pub struct FavoritesMirror<B: KeyValueBackend> {
    backend: B,
    key: String,
}

impl<B: KeyValueBackend> FavoritesMirror<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key holding the last value that failed to parse
    pub fn backup_key(&self) -> String {
        format!("{}.bak", self.key)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Strict read: `Ok(None)` when nothing is stored, an error when the value is unreadable
    pub fn read(&self) -> Result<Option<Vec<FavoriteItem>>, StorageError> {
        match self.backend.get_item(&self.key)? {
            Some(raw) => decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn backup(&mut self) {
        let backup_key = self.backup_key();
        if let Err(e) = self.backend.copy_item(&self.key, &backup_key) {
            warn!("Failed to back up unreadable favorites data: {}", e);
        } else {
            info!("Backed up unreadable favorites data to key {}", backup_key);
        }
    }
}

impl<B: KeyValueBackend> FavoritesPersistence for FavoritesMirror<B> {
    fn load(&mut self) -> Vec<FavoriteItem> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored favorites under {}, starting empty", self.key);
                return Vec::new();
            }
            Err(e @ StorageError::InvalidEncoding { .. }) => {
                warn!("{}. Starting with no favorites.", e);
                self.backup();
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read favorites from storage: {}. Starting with no favorites.", e);
                return Vec::new();
            }
        };

        match decode(&raw) {
            Ok(items) => {
                info!("Loaded {} favorites from {}", items.len(), self.key);
                items
            }
            Err(e) => {
                warn!(
                    "Favorites data under {} is unreadable: {}. Starting with no favorites.",
                    self.key, e
                );
                self.backup();
                Vec::new()
            }
        }
    }

    fn save(&mut self, items: &[FavoriteItem]) -> Result<(), StorageError> {
        let envelope = EnvelopeRef {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            items,
        };
        let json = serde_json::to_string(&envelope)?;
        self.backend.set_item(&self.key, &json)?;
        debug!("Saved {} favorites to {}", items.len(), self.key);
        Ok(())
    }
}

fn decode(raw: &str) -> Result<Vec<FavoriteItem>, StorageError> {
    match serde_json::from_str::<Persisted>(raw)? {
        Persisted::Envelope { version, saved_at, items } => {
            if version == 0 || version > FORMAT_VERSION {
                return Err(StorageError::UnsupportedVersion {
                    found: version,
                    supported: FORMAT_VERSION,
                });
            }
            if let Some(saved_at) = saved_at {
                debug!("Favorites envelope v{} saved at {}", version, saved_at.to_rfc3339());
            }
            Ok(items)
        }
        Persisted::Legacy(items) => {
            debug!("Read legacy favorites array ({} items)", items.len());
            Ok(items)
        }
    }
}
