//! # Local Key/Value Slots
//!
//! Durable string slots that survive a restart: the signed-in user and the
//! POS sync timestamps. Nothing else is persisted.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <data dir>/storage.json                                                │
//! │  {                                                                      │
//! │    "orion_nexus_user": "{\"id\":\"2\",\"name\":\"Sita Patel\",...}",    │
//! │    "last_pos_sync":    "2025-01-15T10:30:00Z",                          │
//! │    "last_pos_sales_pull": "2025-01-15T10:29:58Z"                        │
//! │  }                                                                      │
//! │                                                                         │
//! │  Write path: update map ──► storage.json.tmp ──► rename into place      │
//! │  A crash mid-write leaves the previous document intact.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data dir (via `directories`):
//! - Linux: `~/.local/share/orion-nexus/`
//! - macOS: `~/Library/Application Support/np.orion.orion-nexus/`

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Slot holding the signed-in user as JSON.
pub const SESSION_KEY: &str = "orion_nexus_user";

/// Slot holding the RFC 3339 time of the last successful POS sync.
pub const LAST_POS_SYNC_KEY: &str = "last_pos_sync";

/// Slot holding the `fromDate` of the next POS sales pull. Only a sales pull
/// moves it.
pub const POS_SALES_CURSOR_KEY: &str = "last_pos_sales_pull";

const FILE_NAME: &str = "storage.json";

/// A durable string map.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Reads a slot and decodes it as JSON.
pub fn get_json<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> StoreResult<Option<T>> {
    match kv.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::malformed(key, e)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON into a slot.
pub fn set_json<T: Serialize>(kv: &dyn KeyValueStore, key: &str, value: &T) -> StoreResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    kv.set(key, &raw)
}

// =============================================================================
// File-backed store
// =============================================================================

/// One JSON document on disk, rewritten atomically on every change.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    slots: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens (or creates on first write) `storage.json` inside `dir`.
    ///
    /// A corrupt document is logged and treated as empty; the next write
    /// replaces it.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(FILE_NAME);

        let slots = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(?path, error = %e, "Local storage file is corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "No local storage file yet");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(FileKeyValueStore {
            path,
            slots: Mutex::new(slots),
        })
    }

    /// Opens the store in the platform data directory.
    pub fn open_default() -> StoreResult<Self> {
        let dir = Self::default_dir().ok_or(StoreError::NoDataDir)?;
        Self::open(dir)
    }

    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("np", "orion", "orion-nexus")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, slots: &BTreeMap<String, String>) -> StoreResult<()> {
        let contents = serde_json::to_string_pretty(slots).map_err(|e| StoreError::Encode {
            key: FILE_NAME.to_string(),
            reason: e.to_string(),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut slots = self.lock();
        let previous = slots.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&slots) {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => slots.insert(key.to_string(), old),
                None => slots.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut slots = self.lock();
        if let Some(old) = slots.remove(key) {
            if let Err(e) = self.persist(&slots) {
                slots.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Non-durable store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let kv = FileKeyValueStore::open(dir.path()).unwrap();
            kv.set(LAST_POS_SYNC_KEY, "2025-01-15T10:30:00Z").unwrap();
            kv.set(SESSION_KEY, "{}").unwrap();
            kv.remove(SESSION_KEY).unwrap();
        }

        let kv = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(
            kv.get(LAST_POS_SYNC_KEY).unwrap().as_deref(),
            Some("2025-01-15T10:30:00Z")
        );
        assert_eq!(kv.get(SESSION_KEY).unwrap(), None);
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILE_NAME), "not json").unwrap();

        let kv = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(kv.get(SESSION_KEY).unwrap(), None);

        kv.set(SESSION_KEY, "x").unwrap();
        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get(SESSION_KEY).unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_json_helpers() {
        let kv = MemoryKeyValueStore::new();
        set_json(&kv, "numbers", &vec![1, 2, 3]).unwrap();
        let back: Option<Vec<i32>> = get_json(&kv, "numbers").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));

        kv.set("numbers", "{oops").unwrap();
        let err = get_json::<Vec<i32>>(&kv, "numbers").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));

        assert_eq!(get_json::<Vec<i32>>(&kv, "missing").unwrap(), None);
    }
}
