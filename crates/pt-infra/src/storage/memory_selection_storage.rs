use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pt_core::ports::{SelectionStoragePort, StorageError};

/// In-process record storage.
///
/// Backs the CLI's `--ephemeral` mode and tests. Can be switched to
/// behave like a storage backend that refuses every access, the way a
/// browser does when local storage is disabled.
pub struct MemorySelectionStorage {
    records: Mutex<HashMap<String, String>>,
    available: AtomicBool,
}

impl Default for MemorySelectionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySelectionStorage {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Storage pre-seeded with one raw record, bypassing any encoding.
    pub fn with_record(key: impl Into<String>, payload: impl Into<String>) -> Self {
        let mut records = HashMap::new();
        records.insert(key.into(), payload.into());
        Self {
            records: Mutex::new(records),
            available: AtomicBool::new(true),
        }
    }

    /// Raw record currently stored under `key`.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(key).cloned())
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "record storage is disabled".to_string(),
            ));
        }
        self.records
            .lock()
            .map_err(|_| StorageError::Unavailable("record storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl SelectionStoragePort for MemorySelectionStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records()?.get(key).cloned())
    }

    async fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        self.records()?.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.records()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_read_remove() {
        let storage = MemorySelectionStorage::new();
        assert_eq!(storage.read("cart").await.unwrap(), None);

        storage.write("cart", "[]").await.unwrap();
        assert_eq!(storage.read("cart").await.unwrap().as_deref(), Some("[]"));

        storage.remove("cart").await.unwrap();
        storage.remove("cart").await.unwrap();
        assert_eq!(storage.snapshot("cart"), None);
    }

    #[tokio::test]
    async fn disabled_storage_refuses_every_access() {
        let storage = MemorySelectionStorage::with_record("cart", "[]");
        storage.set_available(false);

        assert!(matches!(
            storage.read("cart").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.write("cart", "[]").await.is_err());

        storage.set_available(true);
        assert!(storage.read("cart").await.unwrap().is_some());
    }
}
