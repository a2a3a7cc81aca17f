//! Durable key-value storage for the high score
//!
//! The engine only needs integer get/set. `JsonFileStore` keeps a flat JSON
//! object on disk and rewrites it on every set; `MemoryStore` is for tests
//! and throwaway sessions.

use crate::core::error::Result;
use crate::core::types::Points;
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Integer key-value storage
pub trait KeyValueStore: Send {
    /// Read a value; `Ok(None)` when the key has never been written
    fn get_int(&self, key: &str) -> Result<Option<Points>>;

    /// Write a value durably before returning
    fn set_int(&mut self, key: &str, value: Points) -> Result<()>;
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<AHashMap<String, Points>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry
    pub fn with_value(key: &str, value: Points) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), value);
        store
    }

    /// Current value of `key`, bypassing the trait
    pub fn peek(&self, key: &str) -> Option<Points> {
        self.lock().get(key).copied()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AHashMap<String, Points>> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> Result<Option<Points>> {
        Ok(self.peek(key))
    }

    fn set_int(&mut self, key: &str, value: Points) -> Result<()> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// JSON file backed store
///
/// The whole map is loaded on open and written back through a temporary
/// file plus rename, so a crash mid-write leaves the previous file intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Points>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened score store {:?} with {} keys", path, values.len());
        Ok(Self { path, values })
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str) -> Result<Option<Points>> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: Points) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ScoreError;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_clones_share_values() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.set_int("HighScore", 42).unwrap();
        assert_eq!(store.get_int("HighScore").unwrap(), Some(42));
        assert_eq!(store.get_int("Missing").unwrap(), None);
    }

    #[test]
    fn test_json_store_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saves").join("scores.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get_int("HighScore").unwrap(), None);
        store.set_int("HighScore", 1234).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_int("HighScore").unwrap(), Some(1234));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_json_store_treats_empty_file_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "  \n").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get_int("HighScore").unwrap(), None);
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStore::open(&path);
        assert!(matches!(result, Err(ScoreError::SerdeError(_))));
    }
}
