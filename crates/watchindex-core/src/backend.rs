use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;
use crate::error::StorageError;

/// String-keyed durable storage, the local-storage role of the browser client
pub trait KeyValueBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Copy the value under `from` to `to`, byte for byte where the backend allows it.
    /// Copying a missing key does nothing.
    fn copy_item(&mut self, from: &str, to: &str) -> Result<(), StorageError> {
        match self.get_item(from)? {
            Some(value) => self.set_item(to, &value),
            None => Ok(()),
        }
    }
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("Storage miss: {} (file does not exist)", path.display());
            return Ok(None);
        }
        let bytes = std::fs::read(&path)?;
        match String::from_utf8(bytes) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(StorageError::InvalidEncoding { key: key.to_string() }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        if let Err(e) = std::fs::rename(&temp_path, &path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!("Storage write: {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn copy_item(&mut self, from: &str, to: &str) -> Result<(), StorageError> {
        let source = self.path_for(from);
        if !source.exists() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir)?;
        std::fs::copy(&source, self.path_for(to))?;
        Ok(())
    }
}

/// Process-local storage, used for ephemeral sessions and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path().join("storage"));

        assert_eq!(backend.get_item("favorites").unwrap(), None);
        backend.set_item("favorites", "[]").unwrap();
        assert_eq!(backend.get_item("favorites").unwrap(), Some("[]".to_string()));
        assert!(backend.path_for("favorites").exists());
        assert!(!backend.path_for("favorites").with_extension("json.tmp").exists());

        backend.set_item("favorites", "[1]").unwrap();
        assert_eq!(backend.get_item("favorites").unwrap(), Some("[1]".to_string()));

        backend.remove_item("favorites").unwrap();
        assert_eq!(backend.get_item("favorites").unwrap(), None);
        // Removing a missing key is fine
        backend.remove_item("favorites").unwrap();
    }

    #[test]
    fn test_file_backend_keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path());
        backend.set_item("a", "1").unwrap();
        backend.set_item("a.bak", "2").unwrap();
        assert_eq!(backend.get_item("a").unwrap(), Some("1".to_string()));
        assert_eq!(backend.get_item("a.bak").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_file_backend_rejects_non_utf8_and_copies_raw_bytes() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path());
        let raw: &[u8] = b"[{\"id\":1,\xff\xfe";
        std::fs::write(backend.path_for("favorites"), raw).unwrap();

        assert!(matches!(
            backend.get_item("favorites"),
            Err(StorageError::InvalidEncoding { ref key }) if key == "favorites"
        ));

        backend.copy_item("favorites", "favorites.bak").unwrap();
        assert_eq!(std::fs::read(backend.path_for("favorites.bak")).unwrap(), raw);
        // Copying a missing key is a no-op
        backend.copy_item("absent", "absent.bak").unwrap();
        assert!(!backend.path_for("absent.bak").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path());
        // A directory in the way makes the rename fail
        std::fs::create_dir(backend.path_for("blocked")).unwrap();
        std::fs::write(backend.path_for("blocked").join("child"), "x").unwrap();

        assert!(backend.set_item("blocked", "[]").is_err());
        assert!(!backend.path_for("blocked").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::new().with_item("k", "v");
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get_item("k").unwrap(), Some("v".to_string()));
        backend.set_item("k", "w").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), Some("w".to_string()));
        backend.copy_item("k", "k.bak").unwrap();
        assert_eq!(backend.get_item("k.bak").unwrap(), Some("w".to_string()));
        backend.remove_item("k").unwrap();
        backend.remove_item("k.bak").unwrap();
        assert!(backend.is_empty());
    }
}
