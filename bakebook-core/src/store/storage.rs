//! Key-value persistence port and its implementations.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Key the recipe collection is stored under.
pub const STORAGE_KEY: &str = "baking-recipes";

/// Read/write of serialized blobs under string keys.
///
/// The store only ever uses one key; the port is keyed so implementations
/// can be shared with other state later.
pub trait BlobStorage: Send + Sync {
    /// Read the blob stored under `key`. `Ok(None)` means nothing was stored yet.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one `{key}.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the default data directory: ~/.bakebook
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".bakebook"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, value).map_err(|source| StorageError::Write { path, source })
    }
}

/// In-memory storage for tests. Writes can be switched to fail.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
    fail_reads: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value under a key.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every read fail, as if the store were inaccessible.
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BlobStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_key_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.read(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_directory_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("data");
        let mut storage = FileStorage::new(&dir);

        storage.write(STORAGE_KEY, "[]").unwrap();

        assert!(dir.join("baking-recipes.json").exists());
        assert_eq!(storage.read(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_read_error_when_path_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("baking-recipes.json")).unwrap();
        let storage = FileStorage::new(temp_dir.path());

        let err = storage.read(STORAGE_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[test]
    fn test_memory_storage_failing_writes() {
        let mut storage = MemoryStorage::new();
        storage.write("k", "v1").unwrap();
        storage.set_fail_writes(true);

        assert!(storage.write("k", "v2").is_err());
        assert_eq!(storage.get("k"), Some("v1"));
        assert_eq!(storage.write_count(), 1);
    }
}
