//! Local selection store
//! 本地购物车选择存储
//!
//! The persisted record is the single source of truth for what is in the
//! cart. Every mutation re-reads the latest record before writing, so a
//! position is always resolved against the current list.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use pt_core::cart::{decode_selection, encode_selection, Position, SelectionEntry};
use pt_core::ids::ItemId;
use pt_core::ports::{SelectionStoragePort, StorageError};

/// Error type for selection store mutations
#[derive(Debug, thiserror::Error)]
pub enum SelectionStoreError {
    #[error("selection storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to encode selection: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct LocalSelectionStore {
    storage: Arc<dyn SelectionStoragePort>,
    record_name: String,
    // Serializes read-modify-write cycles issued from this process.
    mutation: Mutex<()>,
}

impl LocalSelectionStore {
    pub fn new(storage: Arc<dyn SelectionStoragePort>, record_name: impl Into<String>) -> Self {
        Self {
            storage,
            record_name: record_name.into(),
            mutation: Mutex::new(()),
        }
    }

    /// Ordered entries as currently persisted, with dense positions.
    ///
    /// A missing, unreadable or corrupt record reads as an empty selection.
    pub async fn read_all(&self) -> Vec<SelectionEntry> {
        match self.load_ids().await {
            Ok(ids) => SelectionEntry::index_all(ids),
            Err(err) => {
                warn!(error = %err, record = %self.record_name, "Selection storage unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    pub async fn contains(&self, item_id: ItemId) -> bool {
        self.read_all()
            .await
            .iter()
            .any(|entry| entry.item_id == item_id)
    }

    /// Appends one entry. Adding an id that is already selected adds another
    /// unit of it.
    pub async fn add(&self, item_id: ItemId) -> Result<(), SelectionStoreError> {
        let _guard = self.mutation.lock().await;

        let mut ids = self.load_ids().await?;
        ids.push(item_id);
        self.persist(&ids).await?;

        debug!(item_id = %item_id, entries = ids.len(), "Added item to selection");
        Ok(())
    }

    /// Removes the entry at `position` in the latest persisted list and
    /// returns it. Out-of-range positions are a no-op returning `None`.
    pub async fn remove(
        &self,
        position: Position,
    ) -> Result<Option<SelectionEntry>, SelectionStoreError> {
        self.remove_where(position, None).await
    }

    /// Like [`remove`](Self::remove), but only when the entry at `position`
    /// still holds `expected`. Returns `None` and leaves the record alone
    /// otherwise.
    pub async fn remove_expected(
        &self,
        position: Position,
        expected: ItemId,
    ) -> Result<Option<SelectionEntry>, SelectionStoreError> {
        self.remove_where(position, Some(expected)).await
    }

    async fn remove_where(
        &self,
        position: Position,
        expected: Option<ItemId>,
    ) -> Result<Option<SelectionEntry>, SelectionStoreError> {
        let _guard = self.mutation.lock().await;

        let mut ids = self.load_ids().await?;
        let Some(&current) = ids.get(position.index()) else {
            debug!(position = %position, entries = ids.len(), "Remove position out of range, ignoring");
            return Ok(None);
        };
        if expected.is_some_and(|expected| expected != current) {
            debug!(position = %position, item_id = %current, "Entry at position changed, ignoring remove");
            return Ok(None);
        }

        let item_id = ids.remove(position.index());
        self.persist(&ids).await?;

        debug!(position = %position, item_id = %item_id, "Removed item from selection");
        Ok(Some(SelectionEntry::new(item_id, position)))
    }

    /// Empties the selection unconditionally.
    pub async fn clear(&self) -> Result<(), SelectionStoreError> {
        let _guard = self.mutation.lock().await;
        self.storage.remove(&self.record_name).await?;
        debug!(record = %self.record_name, "Cleared selection");
        Ok(())
    }

    async fn load_ids(&self) -> Result<Vec<ItemId>, StorageError> {
        let Some(payload) = self.storage.read(&self.record_name).await? else {
            return Ok(Vec::new());
        };

        match decode_selection(&payload) {
            Ok(ids) => Ok(ids),
            Err(err) => {
                warn!(error = %err, record = %self.record_name, "Corrupt selection record, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, ids: &[ItemId]) -> Result<(), SelectionStoreError> {
        let payload = encode_selection(ids)?;
        self.storage.write(&self.record_name, &payload).await?;
        Ok(())
    }
}
