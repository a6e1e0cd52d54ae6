use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// A keyed JSON cache backed by a single file on disk.
///
/// Entries are loaded once at construction and written back after every
/// insert. Lookups that miss here go out to the network, so a stale or
/// missing cache file is never an error, only a slower run. Safe for
/// concurrent read/insert across enrichment workers.
pub struct FileCache {
    path: Option<PathBuf>,
    entries: DashMap<String, Value>,
}

impl FileCache {
    /// Load the cache from `path`. A missing or corrupt file yields an
    /// empty cache.
    pub fn load(path: &Path) -> Self {
        let entries = DashMap::new();
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
                Ok(map) => {
                    for (k, v) in map {
                        entries.insert(k, v);
                    }
                    debug!(path = %path.display(), count = entries.len(), "Cache loaded");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cache file corrupt, starting empty");
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "No cache file, starting empty");
            }
        }
        Self {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    /// An ephemeral cache that never touches disk. Used in tests and when
    /// no cache directory is configured.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Insert an entry and persist the cache. Persistence failures are
    /// logged and swallowed; the in-memory entry is still usable.
    pub fn insert<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.entries.insert(key.to_string(), v);
                self.save();
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to serialize cache entry"),
        }
    }

    fn save(&self) {
        let Some(path) = &self.path else { return };
        let map: BTreeMap<String, Value> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let serialized = match serde_json::to_string_pretty(&map) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cache");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(path, serialized) {
            warn!(path = %path.display(), error = %e, "Failed to write cache file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_roundtrip() {
        let cache = FileCache::in_memory();
        assert!(cache.is_empty());
        cache.insert("k", &"value".to_string());
        assert_eq!(cache.get::<String>("k"), Some("value".to_string()));
        assert!(cache.get::<String>("missing").is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::load(&dir.path().join("nope.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        {
            let cache = FileCache::load(&path);
            cache.insert("a", &serde_json::json!({"title": "t"}));
        }
        let reloaded = FileCache::load(&path);
        assert_eq!(reloaded.len(), 1);
        let v: serde_json::Value = reloaded.get("a").unwrap();
        assert_eq!(v["title"], "t");
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "not json {").unwrap();
        let cache = FileCache::load(&path);
        assert!(cache.is_empty());
    }
}
