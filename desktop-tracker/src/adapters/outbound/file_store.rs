use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::domain::ports::outbound::{SecureStore, StoreError};

/// JSON file of key/value entries, readable only by the current user.
///
/// Entries are cached in memory and the whole file is rewritten on every change.
pub struct FileSecureStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl FileSecureStore {
    /// Opens the store, loading existing entries from disk.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let entries = load_entries(&path)?;
        tracing::debug!("loaded {} store entries from {:?}", entries.len(), path);
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("desktop-tracker")
            .join("store.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `entries` to disk on the blocking pool.
    async fn persist(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || secure_write(&path, &json))
            .await
            .map_err(std::io::Error::other)??;
        tracing::debug!("persisted {} store entries to {:?}", entries.len(), self.path);
        Ok(())
    }
}

/// The cached map only changes once the new contents are on disk.
#[async_trait]
impl SecureStore for FileSecureStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value);
        self.persist(&updated).await?;
        *entries = updated;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.persist(&updated).await?;
        *entries = updated;
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<Map<String, Value>, StoreError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let raw = std::fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    Ok(serde_json::from_str(&raw)?)
}

fn secure_write(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}
