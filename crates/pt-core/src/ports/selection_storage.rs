use async_trait::async_trait;

use crate::ports::errors::StorageError;

/// Durable key-value record storage, the way a browser's local storage works.
///
/// Records are opaque strings; the selection store owns their layout.
#[async_trait]
pub trait SelectionStoragePort: Send + Sync {
    /// Returns the record, or `None` when nothing is stored under `key`.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the record under `key`.
    async fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Deletes the record. Removing a missing record is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
