//! JSON file standing in for browser `localStorage`.
//!
//! DESIGN
//! ======
//! The whole file is one JSON object of string values. Every write rewrites
//! it through a sibling temp file and a rename, so a crash mid-write leaves
//! either the old or the new contents, never a torn file.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use agriscan::storage::{KeyValueStore, StorageError};

/// Default location of the session file under the user config directory.
pub fn default_state_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("agriscan").join("session.json"))
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> BTreeMap<String, String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable state file");
            BTreeMap::new()
        })
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| e.to_string())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| e.to_string())?;
        fs::rename(&tmp, &self.path).map_err(|e| e.to_string())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read();
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries).map_err(|reason| StorageError::Write { key: key.to_owned(), reason })
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read();
        if entries.remove(key).is_none() {
            return;
        }
        if let Err(e) = self.write(&entries) {
            tracing::warn!(key, error = %e, "failed to remove state entry");
        }
    }
}
