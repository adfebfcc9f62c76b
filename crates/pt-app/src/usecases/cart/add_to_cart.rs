use std::sync::Arc;

use tracing::{error, info};

use pt_core::ids::ItemId;
use pt_core::ports::{Notice, NotificationPort};

use super::{LocalSelectionStore, SelectionStoreError};

/// Use case behind the detail view's "add to cart" button.
pub struct AddToCart {
    store: Arc<LocalSelectionStore>,
    notifier: Arc<dyn NotificationPort>,
}

impl AddToCart {
    pub fn new(store: Arc<LocalSelectionStore>, notifier: Arc<dyn NotificationPort>) -> Self {
        Self { store, notifier }
    }

    /// Appends the item and tells the user whether it worked. Storage
    /// failures surface as a notice and are returned, never panicked on.
    #[tracing::instrument(name = "usecase.add_to_cart.execute", skip(self), fields(item_id = %item_id))]
    pub async fn execute(&self, item_id: ItemId) -> Result<(), SelectionStoreError> {
        match self.store.add(item_id).await {
            Ok(()) => {
                info!("Item added to cart");
                self.notifier.notify(Notice::success("Added to cart"));
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Failed to add item to cart");
                self.notifier.notify(Notice::error("Failed to add to cart"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::RecordingUi;
    use pt_core::ports::NoticeLevel;
    use pt_infra::storage::MemorySelectionStorage;

    #[tokio::test]
    async fn duplicate_adds_are_kept_and_each_is_confirmed() {
        let storage = Arc::new(MemorySelectionStorage::new());
        let store = Arc::new(LocalSelectionStore::new(storage, "cart"));
        let ui = Arc::new(RecordingUi::default());
        let add = AddToCart::new(store.clone(), ui.clone());

        add.execute(ItemId::new(5)).await.unwrap();
        add.execute(ItemId::new(5)).await.unwrap();

        assert_eq!(store.read_all().await.len(), 2);
        let levels: Vec<_> = ui.notices().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Success, NoticeLevel::Success]);
    }

    #[tokio::test]
    async fn storage_failure_is_reported_to_the_user() {
        let storage = Arc::new(MemorySelectionStorage::new());
        storage.set_available(false);
        let store = Arc::new(LocalSelectionStore::new(storage, "cart"));
        let ui = Arc::new(RecordingUi::default());
        let add = AddToCart::new(store, ui.clone());

        assert!(add.execute(ItemId::new(5)).await.is_err());
        assert_eq!(ui.notices(), vec![Notice::error("Failed to add to cart")]);
    }
}
