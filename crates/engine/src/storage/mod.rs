mod atomic_io;
mod key;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use key::{validate_storage_key, StorageKeyError};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: StorageKeyError,
    },
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

fn checked_key(key: &str) -> Result<(), StorageError> {
    validate_storage_key(key).map_err(|source| StorageError::InvalidKey {
        key: key.to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        checked_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        atomic_io::write_text_atomic(&path, value)
            .map_err(|source| StorageError::Write { path, source })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        checked_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        checked_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_missing_key_reads_as_none() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::new(dir.path());
        assert!(store.get("caviaColors").expect("get").is_none());
    }

    #[test]
    fn file_store_round_trips_value() {
        let dir = TempDir::new().expect("temp dir");
        let mut store = FileStore::new(dir.path().join("saves"));
        store.set("caviaColors", "{\"body\":\"white\"}").expect("set");

        let raw = store.get("caviaColors").expect("get").expect("value");
        assert_eq!(raw, "{\"body\":\"white\"}");
        assert!(dir.path().join("saves").join("caviaColors.json").is_file());
    }

    #[test]
    fn file_store_clones_share_the_directory() {
        let dir = TempDir::new().expect("temp dir");
        let mut writer = FileStore::new(dir.path());
        let reader = writer.clone();
        writer.set("gameSettings", "1").expect("set");
        assert_eq!(reader.get("gameSettings").expect("get").as_deref(), Some("1"));
    }

    #[test]
    fn invalid_key_is_rejected_before_touching_disk() {
        let dir = TempDir::new().expect("temp dir");
        let mut store = FileStore::new(dir.path());
        let error = store.set("../escape", "x").expect_err("must fail");
        assert!(matches!(error, StorageError::InvalidKey { .. }));
    }

    #[test]
    fn memory_store_round_trips_value() {
        let mut store = MemoryStore::default();
        assert!(store.get("caviaColors").expect("get").is_none());
        store.set("caviaColors", "raw").expect("set");
        assert_eq!(store.get("caviaColors").expect("get").as_deref(), Some("raw"));
    }
}
