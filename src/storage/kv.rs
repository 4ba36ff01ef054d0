//! Key-value storage seam with optional expiry.
//!
//! Values are stored as JSON inside a `StoredEntry` envelope that carries the
//! expiry instant. Expired entries read as absent and are purged on access.
//! A file that does not parse is an error, never an empty read.

use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    pub fn new(value: Value, ttl: Option<Duration>, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| now + ttl),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str, now: DateTime<Utc>) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>, now: DateTime<Utc>) -> Result<()>;

    /// Returns whether a live or expired entry existed.
    fn remove(&self, key: &str) -> Result<bool>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str, now: DateTime<Utc>) -> Result<Option<Value>> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>, now: DateTime<Utc>) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), StoredEntry::new(value, ttl, now));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key)
            .is_some())
    }
}

/// One pretty-printed JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under ~/.mindcare/store/.
    pub fn in_mindcare_dir() -> Result<Self> {
        Ok(Self::new(super::persistence::mindcare_dir()?.join("store")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File for `key`. ASCII letters, digits and `-` are kept; every other
    /// byte, `_` included, becomes `_XX` hex, so distinct keys never share a file.
    pub(crate) fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("_{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str, now: DateTime<Utc>) -> Result<Option<Value>> {
        let path = self.path_for(key);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry: StoredEntry = serde_json::from_str(&json).map_err(|e| {
            warn!(path = %path.display(), error = %e, "corrupt store entry");
            e
        })?;
        if entry.is_expired(now) {
            debug!(key, "store entry expired");
            self.remove(key)?;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>, now: DateTime<Utc>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&StoredEntry::new(value, ttl, now))?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgressionError;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_store() -> JsonFileStore {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        JsonFileStore::new(std::env::temp_dir().join(format!("mindcare_kv_{}_{}", std::process::id(), n)))
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        store.set("a", json!({"x": 1}), None, t0()).unwrap();
        assert_eq!(store.get("a", t0()).unwrap(), Some(json!({"x": 1})));
        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());
        assert_eq!(store.get("a", t0()).unwrap(), None);
    }

    #[test]
    fn test_memory_store_expiry() {
        let store = MemoryStore::new();
        store.set("k", json!(5), Some(Duration::minutes(10)), t0()).unwrap();
        assert!(store.get("k", t0() + Duration::minutes(9)).unwrap().is_some());
        assert!(store.get("k", t0() + Duration::minutes(10)).unwrap().is_none());
        assert!(!store.remove("k").unwrap(), "expired entry is purged on read");
    }

    #[test]
    fn test_file_store_roundtrip_and_expiry() {
        let store = temp_store();
        store.set("progression:user-1", json!([1, 2]), None, t0()).unwrap();
        store.set("session", json!("tok"), Some(Duration::hours(1)), t0()).unwrap();

        assert_eq!(store.get("progression:user-1", t0()).unwrap(), Some(json!([1, 2])));
        assert_eq!(store.get("session", t0()).unwrap(), Some(json!("tok")));
        assert_eq!(store.get("session", t0() + Duration::hours(2)).unwrap(), None);
        assert!(!store.dir().join("session.json").exists());

        fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_file_store_corrupt_entry_is_an_error() {
        let store = temp_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path_for("bad"), "nope").unwrap();
        assert!(matches!(
            store.get("bad", t0()),
            Err(ProgressionError::Serialization(_))
        ));
        assert!(store.path_for("bad").exists(), "corrupt file is left for inspection");
        fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_keys_are_escaped_to_file_names() {
        let store = JsonFileStore::new("/tmp/x");
        assert!(store
            .path_for("progression:a/b")
            .ends_with("progression_3Aa_2Fb.json"));
        assert!(store.path_for("session").ends_with("session.json"));
    }

    #[test]
    fn test_similar_keys_do_not_share_a_file() {
        let store = temp_store();
        store.set("progression:bob.smith", json!(1), None, t0()).unwrap();
        store.set("progression:bob_smith", json!(2), None, t0()).unwrap();
        store.set("progression:bob_2Esmith", json!(3), None, t0()).unwrap();

        assert_eq!(store.get("progression:bob.smith", t0()).unwrap(), Some(json!(1)));
        assert_eq!(store.get("progression:bob_smith", t0()).unwrap(), Some(json!(2)));
        assert_eq!(store.get("progression:bob_2Esmith", t0()).unwrap(), Some(json!(3)));
        fs::remove_dir_all(store.dir()).ok();
    }
}
