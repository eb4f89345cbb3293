//! Session store trait.

use async_trait::async_trait;

use crate::error::Result;

/// Durable storage for the session marker.
///
/// This is the single source of truth for the session flag; in-memory
/// copies are caches rehydrated from it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the raw marker value, `None` when no marker is stored.
    async fn read_marker(&self) -> Result<Option<String>>;

    /// Writes the marker value, replacing any previous one.
    async fn write_marker(&self, value: &str) -> Result<()>;

    /// Removes the marker entirely. Removing an absent marker is not an error.
    async fn remove_marker(&self) -> Result<()>;
}
