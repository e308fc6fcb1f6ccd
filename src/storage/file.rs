//! # File Store
//!
//! File-backed [`KeyValueStore`] implementation: one file per key under a
//! base directory, file name equal to the key. Writes go through a temp file
//! followed by a rename so a crash mid-write never leaves a half-written
//! value behind.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;

/// FileStore manages the on-device data directory and maps keys to files.
#[derive(Clone)]
pub struct FileStore {
    base_directory: PathBuf,
}

impl FileStore {
    /// Create a new file store rooted at `base_directory`, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// The directory this store reads and writes under.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Resolve a key to its file path, rejecting anything that could escape
    /// the base directory.
    fn path_for_key(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(anyhow!("Storage key must not be empty"));
        }
        if key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(anyhow!("Storage key contains path characters: {}", key));
        }
        Ok(self.base_directory.join(key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for_key(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for_key(key)?;
        let temp_path = self.base_directory.join(format!("{}.tmp", key));

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        debug!("Wrote {} bytes under key {}", value.len(), key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for_key(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base_directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                // A leftover temp file is not a key.
                if name.ends_with(".tmp") {
                    continue;
                }
                keys.push(name.to_string());
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_store() -> (FileStore, tempfile::TempDir) {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_set_and_get_round_trip() {
        let (store, _temp_dir) = setup_store();

        store.set("expenses_2024_03", "{\"records\":[]}").await.unwrap();
        let value = store.get("expenses_2024_03").await.unwrap();
        assert_eq!(value, Some("{\"records\":[]}".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let (store, _temp_dir) = setup_store();
        assert_eq!(store.get("lastCleanupDate").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        {
            let store = FileStore::new(temp_dir.path()).unwrap();
            store.set("app_theme_mode", "dark").await.unwrap();
        }
        let reopened = FileStore::new(temp_dir.path()).unwrap();
        assert_eq!(
            reopened.get("app_theme_mode").await.unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let (store, _temp_dir) = setup_store();

        store.set("app_theme_mode", "light").await.unwrap();
        store.set("app_theme_mode", "dark").await.unwrap();
        assert_eq!(
            store.get("app_theme_mode").await.unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_many_skips_absent_keys() {
        let (store, _temp_dir) = setup_store();

        store.set("expenses_2024_01", "a").await.unwrap();
        let keys = vec![
            "expenses_2024_01".to_string(),
            "expenses_2023_12".to_string(),
        ];
        store.remove_many(&keys).await.unwrap();
        assert_eq!(store.get("expenses_2024_01").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_keys_excludes_temp_files() {
        let (store, temp_dir) = setup_store();

        store.set("expenses_2024_03", "a").await.unwrap();
        store.set("lastCleanupDate", "b").await.unwrap();
        std::fs::write(temp_dir.path().join("stale.tmp"), "c").unwrap();

        let mut keys = store.list_keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["expenses_2024_03", "lastCleanupDate"]);
    }

    #[tokio::test]
    async fn test_key_with_path_separator_is_rejected() {
        let (store, _temp_dir) = setup_store();
        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("a/b").await.is_err());
    }
}
