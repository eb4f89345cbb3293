//! Durable and in-memory implementations of [`SessionStore`].

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use finpanel_core::error::{FinpanelError, Result};
use finpanel_core::session::{SessionMarker, SessionStore};
use tokio::sync::Mutex;

use crate::paths::FinpanelPaths;
use crate::storage::AtomicTomlFile;

/// Session marker kept in `session.toml`.
///
/// The file exists only while logged in; logout deletes it. File I/O runs
/// on the blocking pool so callers on the runtime thread never stall.
#[derive(Clone)]
pub struct FileSessionStore {
    file: Arc<AtomicTomlFile<SessionMarker>>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    pub fn from_paths(paths: &FinpanelPaths) -> Self {
        Self::new(paths.session_file())
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AtomicTomlFile<SessionMarker>) -> Result<T> + Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || op(&file))
            .await
            .map_err(|e| FinpanelError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn read_marker(&self) -> Result<Option<String>> {
        let marker = self
            .blocking(|file| match file.load() {
                Ok(marker) => Ok(marker),
                Err(e) => {
                    // A corrupt marker reads as logged out rather than
                    // blocking startup.
                    tracing::warn!(path = ?file.path(), "Ignoring unreadable session marker: {}", e);
                    Ok(None)
                }
            })
            .await?;
        Ok(marker.map(|m| m.value))
    }

    async fn write_marker(&self, value: &str) -> Result<()> {
        let marker = SessionMarker {
            value: value.to_string(),
        };
        self.blocking(move |file| file.save(&marker).map_err(FinpanelError::from))
            .await
    }

    async fn remove_marker(&self) -> Result<()> {
        self.blocking(|file| file.remove().map_err(FinpanelError::from))
            .await
    }
}

/// Process-local store, for ephemeral runs and tests.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    marker: Arc<Mutex<Option<String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(value: impl Into<String>) -> Self {
        Self {
            marker: Arc::new(Mutex::new(Some(value.into()))),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn read_marker(&self) -> Result<Option<String>> {
        Ok(self.marker.lock().await.clone())
    }

    async fn write_marker(&self, value: &str) -> Result<()> {
        *self.marker.lock().await = Some(value.to_string());
        Ok(())
    }

    async fn remove_marker(&self) -> Result<()> {
        *self.marker.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_missing_marker() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.toml"));
        assert_eq!(store.read_marker().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_write_read_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        let store = FileSessionStore::new(path.clone());

        store.write_marker("true").await.unwrap();
        assert_eq!(store.read_marker().await.unwrap().as_deref(), Some("true"));

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("isAuthenticated = \"true\""));

        store.remove_marker().await.unwrap();
        assert!(!path.exists());
        assert_eq!(store.read_marker().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        FileSessionStore::new(path.clone())
            .write_marker("true")
            .await
            .unwrap();

        let reopened = FileSessionStore::new(path);
        assert_eq!(reopened.read_marker().await.unwrap().as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_corrupt_marker_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "isAuthenticated = ").unwrap();
        let store = FileSessionStore::new(path);
        assert_eq!(store.read_marker().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemorySessionStore::with_marker("true");
        assert_eq!(store.read_marker().await.unwrap().as_deref(), Some("true"));
        store.remove_marker().await.unwrap();
        assert_eq!(store.read_marker().await.unwrap(), None);
    }
}
