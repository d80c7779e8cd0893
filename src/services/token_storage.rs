//! Durable auth token storage
//!
//! The token is the only piece of client state that survives a restart. It is
//! kept in a small JSON key-value file under the fixed key [`TOKEN_KEY`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use async_trait::async_trait;
use tracing::{debug, warn};
use crate::utils::errors::{RegistonError, Result};

/// Key the token is stored under
pub const TOKEN_KEY: &str = "token";

/// Persistence seam for the session token
#[async_trait]
pub trait TokenStorage: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;
    async fn save(&self, token: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// File-backed token storage
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&data) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupted token storage");
                Ok(BTreeMap::new())
            }
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, serialized).await.map_err(|e| {
            RegistonError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl TokenStorage for FileTokenStorage {
    async fn load(&self) -> Result<Option<String>> {
        let entries = self.read_entries().await?;
        Ok(entries.get(TOKEN_KEY).cloned())
    }

    async fn save(&self, token: &str) -> Result<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries).await?;
        debug!(path = %self.path.display(), "Token persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries().await?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries).await?;
            debug!(path = %self.path.display(), "Token removed");
        }
        Ok(())
    }
}

/// Process-local token storage, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.slot().clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested/session.json"));

        assert_eq!(storage.load().await.unwrap(), None);

        storage.save("abc123").await.unwrap();
        assert_eq!(storage.load().await.unwrap().as_deref(), Some("abc123"));

        let reopened = FileTokenStorage::new(storage.path().to_path_buf());
        assert_eq!(reopened.load().await.unwrap().as_deref(), Some("abc123"));

        storage.clear().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, r#"{"theme":"dark"}"#).await.unwrap();

        let storage = FileTokenStorage::new(&path);
        storage.save("tok").await.unwrap();
        storage.clear().await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("theme"));
        assert!(!raw.contains(TOKEN_KEY));
    }

    #[tokio::test]
    async fn test_corrupted_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let storage = FileTokenStorage::new(&path);
        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryTokenStorage::with_token("t");
        assert_eq!(storage.load().await.unwrap().as_deref(), Some("t"));
        storage.clear().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), None);
    }
}
