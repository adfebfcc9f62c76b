//! Selection view model
//! 购物车视图模型
//!
//! Reconciled, index-stable list consumed by the cart screen.
//!
//! Hydration runs as a detached batch so that the screen can go away while
//! fetches are in flight:
//!
//! ```text
//! begin_hydration()  -> HydrationBatch (all rows Pending, loading = true)
//! batch.run(..)      -> HydrationResult   (await point, no &mut borrow)
//! apply(result)      -> bool              (false when stale)
//! ```
//!
//! A result is stale when the view was unmounted, cleared or re-hydrated
//! after the batch started. Rows are matched by an internal slot rather
//! than by index, so removing a row while a batch is in flight does not
//! shift results onto the wrong rows.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use pt_core::cart::{HydratedEntry, HydrationStatus, Position, SelectionEntry};
use pt_core::ids::ItemId;

use super::{HydrateSelection, LocalSelectionStore, SelectionStoreError};

#[derive(Debug, Clone)]
struct ViewRow {
    slot: u64,
    entry: HydratedEntry,
}

/// Hydration work detached from the view model.
#[derive(Debug, Clone)]
pub struct HydrationBatch {
    epoch: u64,
    slots: Vec<u64>,
    entries: Vec<SelectionEntry>,
}

impl HydrationBatch {
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub async fn run(self, hydrator: &HydrateSelection) -> HydrationResult {
        let hydrated = hydrator.execute(&self.entries).await;
        HydrationResult {
            epoch: self.epoch,
            slots: self.slots,
            hydrated,
        }
    }
}

/// Settled batch, ready to be applied to the view that started it.
#[derive(Debug, Clone)]
pub struct HydrationResult {
    epoch: u64,
    slots: Vec<u64>,
    hydrated: Vec<HydratedEntry>,
}

pub struct SelectionViewModel {
    store: Arc<LocalSelectionStore>,
    hydrator: Arc<HydrateSelection>,
    rows: Vec<ViewRow>,
    loading: bool,
    mounted: bool,
    epoch: u64,
    next_slot: u64,
}

impl SelectionViewModel {
    pub fn new(store: Arc<LocalSelectionStore>, hydrator: Arc<HydrateSelection>) -> Self {
        Self {
            store,
            hydrator,
            rows: Vec::new(),
            loading: false,
            mounted: false,
            epoch: 0,
            next_slot: 0,
        }
    }

    pub fn mount(&mut self) {
        self.mounted = true;
        self.epoch += 1;
    }

    /// Drops all rows and invalidates in-flight batches.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.epoch += 1;
        self.rows.clear();
        self.loading = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True from the start of a hydration until its batch is applied.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HydratedEntry> + '_ {
        self.rows.iter().map(|row| &row.entry)
    }

    /// Owned copy of the current rows, e.g. for the checkout gate.
    pub fn snapshot(&self) -> Vec<HydratedEntry> {
        self.entries().cloned().collect()
    }

    /// Display total: sum of prices over hydrated rows. Pending and failed
    /// rows count as zero. Never used as the order amount.
    pub fn total_price(&self) -> u64 {
        self.entries()
            .filter_map(HydratedEntry::detail)
            .fold(0u64, |total, detail| total.saturating_add(detail.price))
    }

    /// Reads the latest selection, publishes it as all-pending rows and
    /// returns the batch that will hydrate it.
    pub async fn begin_hydration(&mut self) -> HydrationBatch {
        let entries = self.store.read_all().await;

        self.epoch += 1;
        self.rows = entries
            .iter()
            .map(|entry| {
                let slot = self.next_slot;
                self.next_slot += 1;
                ViewRow {
                    slot,
                    entry: HydratedEntry::pending(*entry),
                }
            })
            .collect();
        self.loading = true;

        debug!(epoch = self.epoch, entries = entries.len(), "Started hydration batch");

        HydrationBatch {
            epoch: self.epoch,
            slots: self.rows.iter().map(|row| row.slot).collect(),
            entries,
        }
    }

    /// Applies a settled batch. Returns `false` and leaves the view untouched
    /// when the batch is stale.
    pub fn apply(&mut self, result: HydrationResult) -> bool {
        if !self.mounted || result.epoch != self.epoch {
            debug!(
                batch_epoch = result.epoch,
                current_epoch = self.epoch,
                mounted = self.mounted,
                "Discarding stale hydration result"
            );
            return false;
        }

        let mut by_slot: HashMap<u64, HydrationStatus> = result
            .slots
            .into_iter()
            .zip(result.hydrated.into_iter().map(|hydrated| hydrated.status))
            .collect();
        for row in &mut self.rows {
            if let Some(status) = by_slot.remove(&row.slot) {
                row.entry.status = status;
            }
        }
        self.loading = false;
        true
    }

    /// Reloads and hydrates the whole selection.
    pub async fn refresh(&mut self) -> bool {
        let batch = self.begin_hydration().await;
        let hydrator = Arc::clone(&self.hydrator);
        let result = batch.run(&hydrator).await;
        self.apply(result)
    }

    /// Re-hydrates only when the persisted item sequence differs from the
    /// displayed one. Returns whether a hydration ran.
    pub async fn sync(&mut self) -> bool {
        let persisted: Vec<ItemId> = self
            .store
            .read_all()
            .await
            .iter()
            .map(|entry| entry.item_id)
            .collect();
        let displayed: Vec<ItemId> = self.entries().map(|entry| entry.item_id).collect();

        if persisted == displayed {
            return false;
        }
        self.refresh().await
    }

    /// Removes the row shown at `position`.
    ///
    /// The persisted entry is removed only if it is still the item this row
    /// shows; the row is then dropped in memory and the remaining rows keep
    /// their hydration results. When the selection changed underneath the
    /// view nothing is removed and the view reloads instead.
    pub async fn remove_at(
        &mut self,
        position: Position,
    ) -> Result<Option<SelectionEntry>, SelectionStoreError> {
        let Some(shown) = self.rows.get(position.index()).map(|row| row.entry.item_id) else {
            warn!(position = %position, "Nothing displayed at position, reloading");
            self.refresh().await;
            return Ok(None);
        };

        let removed = self.store.remove_expected(position, shown).await?;
        match removed {
            Some(_) => {
                self.rows.remove(position.index());
                self.reindex();
            }
            None => {
                warn!(position = %position, item_id = %shown, "Selection changed underneath the view, reloading");
                self.refresh().await;
            }
        }
        Ok(removed)
    }

    /// Empties the cart and the view.
    pub async fn clear(&mut self) -> Result<(), SelectionStoreError> {
        self.store.clear().await?;
        self.epoch += 1;
        self.rows.clear();
        self.loading = false;
        Ok(())
    }

    fn reindex(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.entry.position = Position::new(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{item, MockCatalog};
    use pt_core::cart::HydrationState;
    use pt_core::ports::CatalogError;
    use pt_infra::storage::MemorySelectionStorage;

    async fn seeded_store(ids: &[i64]) -> Arc<LocalSelectionStore> {
        let store = Arc::new(LocalSelectionStore::new(
            Arc::new(MemorySelectionStorage::new()),
            "cart",
        ));
        for &id in ids {
            store.add(ItemId::new(id)).await.unwrap();
        }
        store
    }

    fn catalog_pricing(price_of: fn(i64) -> Option<u64>) -> Arc<HydrateSelection> {
        let mut catalog = MockCatalog::new();
        catalog.expect_fetch_item().returning(move |id| match price_of(id.inner()) {
            Some(price) => Ok(item(id.inner(), price, "TERSEDIA")),
            None => Err(CatalogError::HttpStatus { status: 500 }),
        });
        Arc::new(HydrateSelection::new(Arc::new(catalog)))
    }

    #[tokio::test]
    async fn refresh_hydrates_all_rows_and_clears_loading() {
        let store = seeded_store(&[1, 2]).await;
        let mut view = SelectionViewModel::new(store, catalog_pricing(|id| Some(id as u64 * 100)));
        view.mount();

        assert!(view.refresh().await);
        assert!(!view.is_loading());
        assert_eq!(view.total_price(), 300);
    }

    #[tokio::test]
    async fn rows_are_pending_while_batch_is_in_flight() {
        let store = seeded_store(&[1, 2]).await;
        let hydrator = catalog_pricing(|_| Some(10));
        let mut view = SelectionViewModel::new(store, hydrator.clone());
        view.mount();

        let batch = view.begin_hydration().await;
        assert!(view.is_loading());
        assert!(view.entries().all(|e| e.state() == HydrationState::Pending));

        let result = batch.run(&hydrator).await;
        assert!(view.apply(result));
        assert!(view.entries().all(|e| e.state() == HydrationState::Ready));
    }

    #[tokio::test]
    async fn total_price_ignores_pending_and_failed_rows() {
        let store = seeded_store(&[1, 2, 3]).await;
        let mut view = SelectionViewModel::new(
            store,
            catalog_pricing(|id| match id {
                1 => Some(100),
                3 => Some(50),
                _ => None,
            }),
        );
        view.mount();
        view.refresh().await;

        assert_eq!(view.total_price(), 150);
    }

    #[tokio::test]
    async fn remove_at_drops_row_without_refetching_others() {
        let store = seeded_store(&[1, 2, 3]).await;
        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_item()
            .times(3)
            .returning(|id| Ok(item(id.inner(), 10, "TERSEDIA")));
        let hydrator = Arc::new(HydrateSelection::new(Arc::new(catalog)));
        let mut view = SelectionViewModel::new(store.clone(), hydrator);
        view.mount();
        view.refresh().await;

        let removed = view.remove_at(Position::new(1)).await.unwrap();
        assert_eq!(removed.map(|e| e.item_id), Some(ItemId::new(2)));

        let shown: Vec<_> = view.entries().map(|e| (e.position.index(), e.item_id.inner())).collect();
        assert_eq!(shown, vec![(0, 1), (1, 3)]);
        assert!(view.entries().all(HydratedEntry::is_ready));

        let persisted: Vec<_> = store.read_all().await.iter().map(|e| e.item_id.inner()).collect();
        assert_eq!(persisted, vec![1, 3]);

        assert!(!view.sync().await, "identity unchanged, no re-hydration");
    }

    #[tokio::test]
    async fn removal_during_flight_applies_results_to_surviving_rows() {
        let store = seeded_store(&[1, 2, 3]).await;
        let hydrator = catalog_pricing(|id| Some(id as u64));
        let mut view = SelectionViewModel::new(store, hydrator.clone());
        view.mount();

        let batch = view.begin_hydration().await;
        view.remove_at(Position::new(0)).await.unwrap();
        let result = batch.run(&hydrator).await;

        assert!(view.apply(result));
        let prices: Vec<_> = view.entries().map(|e| e.detail().unwrap().price).collect();
        assert_eq!(prices, vec![2, 3]);
    }

    #[tokio::test]
    async fn unmount_then_remount_discards_first_batch() {
        let store = seeded_store(&[1]).await;
        let hydrator = catalog_pricing(|id| Some(id as u64 * 10));
        let mut view = SelectionViewModel::new(store.clone(), hydrator.clone());
        view.mount();

        let first = view.begin_hydration().await;
        view.unmount();

        store.add(ItemId::new(2)).await.unwrap();
        view.mount();
        let second = view.begin_hydration().await;

        let first_result = first.run(&hydrator).await;
        assert!(!view.apply(first_result));
        assert_eq!(view.len(), 2);
        assert!(view.entries().all(|e| e.state() == HydrationState::Pending));

        let second_result = second.run(&hydrator).await;
        assert!(view.apply(second_result));
        assert_eq!(view.total_price(), 30);
    }

    #[tokio::test]
    async fn remove_at_after_outside_change_keeps_store_and_reloads() {
        let store = seeded_store(&[1, 2, 3]).await;
        let mut view = SelectionViewModel::new(store.clone(), catalog_pricing(|_| Some(1)));
        view.mount();
        view.refresh().await;

        store.remove(Position::new(0)).await.unwrap();
        let removed = view.remove_at(Position::new(0)).await.unwrap();

        assert_eq!(removed, None);
        let persisted: Vec<_> = store.read_all().await.iter().map(|e| e.item_id.inner()).collect();
        assert_eq!(persisted, vec![2, 3]);
        let shown: Vec<_> = view.entries().map(|e| e.item_id.inner()).collect();
        assert_eq!(shown, persisted);
    }

    #[tokio::test]
    async fn remove_at_beyond_displayed_rows_reloads_without_removing() {
        let store = seeded_store(&[1]).await;
        let mut view = SelectionViewModel::new(store.clone(), catalog_pricing(|_| Some(1)));
        view.mount();
        view.refresh().await;
        store.add(ItemId::new(2)).await.unwrap();

        assert_eq!(view.remove_at(Position::new(1)).await.unwrap(), None);
        assert_eq!(store.read_all().await.len(), 2);
        assert_eq!(view.entries().count(), 2);
    }

    #[tokio::test]
    async fn total_price_saturates_instead_of_overflowing() {
        let store = seeded_store(&[1, 2]).await;
        let mut view = SelectionViewModel::new(store, catalog_pricing(|_| Some(u64::MAX - 1)));
        view.mount();
        view.refresh().await;

        assert_eq!(view.total_price(), u64::MAX);
    }

    #[tokio::test]
    async fn result_after_unmount_is_not_applied() {
        let store = seeded_store(&[1]).await;
        let hydrator = catalog_pricing(|_| Some(1));
        let mut view = SelectionViewModel::new(store, hydrator.clone());
        view.mount();

        let batch = view.begin_hydration().await;
        view.unmount();

        assert!(!view.apply(batch.run(&hydrator).await));
        assert!(view.is_empty());
    }

    #[tokio::test]
    async fn sync_rehydrates_when_selection_changes() {
        let store = seeded_store(&[1]).await;
        let mut view = SelectionViewModel::new(store.clone(), catalog_pricing(|_| Some(5)));
        view.mount();
        view.refresh().await;
        assert!(!view.sync().await);

        store.add(ItemId::new(1)).await.unwrap();
        assert!(view.sync().await);
        assert_eq!(view.len(), 2);
        assert_eq!(view.total_price(), 10);
    }

    #[tokio::test]
    async fn clear_empties_store_and_view() {
        let store = seeded_store(&[1, 2]).await;
        let mut view = SelectionViewModel::new(store.clone(), catalog_pricing(|_| Some(5)));
        view.mount();
        view.refresh().await;

        view.clear().await.unwrap();

        assert!(view.is_empty());
        assert!(store.read_all().await.is_empty());
    }
}
