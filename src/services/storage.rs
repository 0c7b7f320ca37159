//! Local persistent key-value storage.
//!
//! The application keeps a handful of string values (currently only the
//! resume download counter) in a JSON object on disk. Writes use the
//! temp file + rename pattern so the file is never left half-written.

use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// String key-value storage.
///
/// Implementations must be usable from the UI thread only; no cross-process
/// locking is performed, so concurrent writers follow last-writer-wins.
pub trait KeyValueStore: Send {
    /// Reads a value. Missing keys yield `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, persisting it before returning.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Key-value store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at the given file path. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).context(format!(
            "Failed to read storage file: {}",
            self.path.display()
        ))?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        // A damaged file reads as empty; the next write replaces it
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unparsable storage file"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context(format!(
                "Failed to create storage directory: {}",
                dir.display()
            ))?;
        }

        let content =
            serde_json::to_string_pretty(entries).context("Failed to serialize storage")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp storage file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp storage file to: {}",
            self.path.display()
        ))?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// In-memory key-value store.
///
/// Clones share the same entries, so a test can keep a handle and inspect
/// what the code under test wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("Storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("Storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("storage.json"));
        assert_eq!(store.get("resume_downloads").unwrap(), None);
    }

    #[test]
    fn test_json_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("storage.json");
        let store = JsonFileStore::new(&path);

        store.set("resume_downloads", "5").unwrap();
        store.set("other", "x").unwrap();
        assert_eq!(store.get("resume_downloads").unwrap().as_deref(), Some("5"));
        assert!(!path.with_extension("json.tmp").exists());

        // A fresh handle sees the persisted value
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_json_store_corrupt_file_reads_empty_and_is_repaired() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, r#"{"resume_downloads": "4""#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("resume_downloads").unwrap(), None);

        store.set("resume_downloads", "1").unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.get("resume_downloads").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::with_entry("resume_downloads", "2");
        let handle = store.clone();
        store.set("resume_downloads", "3").unwrap();
        assert_eq!(handle.get("resume_downloads").unwrap().as_deref(), Some("3"));
    }
}
