//! Key-value backends
//!
//! The persistence layer only needs string values under fixed string keys.
//! [`FileStore`] keeps one file per key in a data directory; [`MemoryStore`]
//! keeps everything in process and is handy for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fs2::FileExt;

use super::StorageError;

/// Minimal string key-value store
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` if never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Directory-backed store, one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path).map_err(|e| io_error(&path, e))?;

        // Shared lock for reading, released when the file is dropped
        file.lock_shared().map_err(|e| io_error(&path, e))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| io_error(&path, e))?;

        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let path = self.path_for(key);
        let temp_path = self.dir.join(format!("{}.tmp", key));

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| io_error(&temp_path, e))?;

            file.lock_exclusive().map_err(|e| io_error(&temp_path, e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| io_error(&temp_path, e))?;
            file.flush().map_err(|e| io_error(&temp_path, e))?;
        }

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(|e| io_error(&path, e))?;

        Ok(())
    }
}

/// In-process store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set` fail, to exercise storage error paths
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Returns the raw value under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable(format!("write to '{}' rejected", key)));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn file_store_set_and_get() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("light".to_string()));
    }

    #[test]
    fn file_store_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));

        store.set("key", "value").unwrap();
        assert!(store.path_for("key").exists());
    }

    #[test]
    fn file_store_write_is_atomic() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.set("key", "value").unwrap();

        // Temp file should not exist after write
        assert!(!dir.path().join("key.tmp").exists());
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("a", "1").unwrap();
        assert_eq!(handle.get("a").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn memory_store_failing_writes() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.set("a", "1").is_err());
        assert_eq!(store.raw("a"), None);

        store.set_fail_writes(false);
        assert!(store.set("a", "1").is_ok());
    }
}
