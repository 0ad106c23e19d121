//! Builds the persistence adapter selected in the configuration.
//!
//! The application entry point calls [`open_store`] once at startup and passes the
//! resulting store down to whatever needs it; there is no global instance.

use tracing::debug;
use watchindex_config::{Config, PathManager, StorageBackendKind};
use crate::backend::{FileBackend, MemoryBackend};
use crate::mirror::{FavoritesMirror, FavoritesPersistence, NoopPersistence};
use crate::store::FavoritesStore;

pub fn open_persistence(config: &Config, paths: &PathManager) -> Box<dyn FavoritesPersistence> {
    let key = config.storage.key.trim().to_string();
    match config.storage.backend {
        StorageBackendKind::File => {
            let dir = config.storage.resolve_dir(paths);
            debug!("Using file storage at {} (key {})", dir.display(), key);
            Box::new(FavoritesMirror::new(FileBackend::new(dir), key))
        }
        StorageBackendKind::Memory => {
            debug!("Using in-memory storage (key {})", key);
            Box::new(FavoritesMirror::new(MemoryBackend::new(), key))
        }
        StorageBackendKind::None => {
            debug!("Favorites persistence disabled");
            Box::new(NoopPersistence)
        }
    }
}

pub fn open_store(config: &Config, paths: &PathManager) -> FavoritesStore<Box<dyn FavoritesPersistence>> {
    FavoritesStore::open(open_persistence(config, paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use watchindex_models::{FavoriteItem, MediaType};

    #[test]
    fn test_file_store_persists_under_configured_dir() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let config = Config::default();

        let mut store = open_store(&config, &paths);
        store.add(FavoriteItem::movie(550, "Fight Club"));
        drop(store);

        assert!(paths.storage_dir().join("watchindex_favorites.json").exists());
        let reopened = open_store(&config, &paths);
        assert!(reopened.is_favorite(550, MediaType::Movie));
    }

    #[test]
    fn test_memory_and_none_backends_do_not_touch_disk() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());

        for backend in [StorageBackendKind::Memory, StorageBackendKind::None] {
            let mut config = Config::default();
            config.storage.backend = backend;
            let mut store = open_store(&config, &paths);
            store.add(FavoriteItem::show(1399, "Game of Thrones"));
            assert_eq!(store.count(), 1);
        }

        assert!(!paths.storage_dir().exists());
    }
}
