//! Local result store
//!
//! Keeps the last result of each workflow step in a single JSON file so a
//! later command (or a later run) can pick it up again. Each key holds an
//! opaque JSON value plus the time it was saved.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fixed store keys, one per workflow step
pub mod keys {
    pub const SERMON_DRAFT: &str = "sermon_draft";
    pub const BIBLE_MESSAGE: &str = "bible_message";
    pub const PRODUCT_COPY: &str = "product_copy";
    pub const PRODUCT_IMAGES: &str = "product_images";
    pub const TRANSLATION: &str = "translation";
    pub const SHORTDRAMA_VIDEO: &str = "shortdrama_video";
}

/// One stored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub saved_at: DateTime<Utc>,
    pub value: Value,
}

/// File-backed key-value store
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, ordered by key; a missing file is an empty store
    pub fn entries(&self) -> Result<BTreeMap<String, StoredEntry>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store {}", self.path.display()))?;

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw)
            .with_context(|| format!("Store {} is not valid JSON", self.path.display()))
    }

    /// Raw entry for a key
    pub fn entry(&self, key: &str) -> Result<Option<StoredEntry>> {
        Ok(self.entries()?.remove(key))
    }

    /// Stores a value under a key, replacing what was there
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).context("Failed to serialize stored value")?;

        let mut entries = self.entries()?;
        entries.insert(
            key.to_string(),
            StoredEntry {
                saved_at: Utc::now(),
                value,
            },
        );
        self.write_all(&entries)?;

        debug!("Saved '{}' to {}", key, self.path.display());
        Ok(())
    }

    /// Loads and deserializes the value under a key
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.entry(key)? {
            Some(entry) => {
                let value = serde_json::from_value(entry.value)
                    .with_context(|| format!("Stored value '{}' has an unexpected shape", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Removes a key; returns whether it existed
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries()?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.write_all(&entries)?;
        }
        Ok(existed)
    }

    /// Removes every key
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove store {}", self.path.display()))?;
        }
        Ok(())
    }

    fn write_all(&self, entries: &BTreeMap<String, StoredEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create store directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(entries).context("Failed to serialize store")?;

        // Write then rename so an interrupted save never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace store {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::domain::content::Translation;
    use studio_core::domain::job::RenderResult;

    fn temp_store() -> (tempfile::TempDir, ResultStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("nested").join("state.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.entries().unwrap().is_empty());
        assert!(store.load::<Translation>(keys::TRANSLATION).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reopen() {
        let (_dir, store) = temp_store();
        let result = RenderResult {
            video_url: "/media/x.mp4".to_string(),
            duration_secs: Some(65.0),
            size_bytes: None,
        };

        store.save(keys::SHORTDRAMA_VIDEO, &result).unwrap();

        let reopened = ResultStore::new(store.path().to_path_buf());
        let loaded: RenderResult = reopened.load(keys::SHORTDRAMA_VIDEO).unwrap().unwrap();
        assert_eq!(loaded, result);
    }

    #[test]
    fn test_save_replaces_and_keeps_other_keys() {
        let (_dir, store) = temp_store();
        store.save(keys::TRANSLATION, &serde_json::json!({"translation": "a"})).unwrap();
        store.save(keys::SERMON_DRAFT, &serde_json::json!({"title": "t"})).unwrap();
        store.save(keys::TRANSLATION, &serde_json::json!({"translation": "b"})).unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[keys::TRANSLATION].value["translation"], "b");
    }

    #[test]
    fn test_remove_and_clear() {
        let (_dir, store) = temp_store();
        store.save(keys::PRODUCT_COPY, &"copy").unwrap();
        store.save(keys::PRODUCT_IMAGES, &"images").unwrap();

        assert!(store.remove(keys::PRODUCT_COPY).unwrap());
        assert!(!store.remove(keys::PRODUCT_COPY).unwrap());
        assert_eq!(store.entries().unwrap().len(), 1);

        store.clear().unwrap();
        assert!(store.entries().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.entries().is_err());
    }
}
