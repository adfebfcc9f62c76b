//! Detail hydrator
//! 购物车条目详情补全
//!
//! One fetch per distinct item id, issued concurrently and joined before
//! anything is returned. Results are fanned back out over every entry,
//! duplicates included, in input order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use pt_core::cart::{HydratedEntry, HydrationStatus, SelectionEntry};
use pt_core::ids::ItemId;
use pt_core::ports::{CatalogError, CatalogPort};

pub struct HydrateSelection {
    catalog: Arc<dyn CatalogPort>,
}

impl HydrateSelection {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    /// Hydrates every entry with its authoritative detail.
    ///
    /// Never fails as a whole: a fetch error only marks the entries sharing
    /// that item id as `Failed`. The returned vector has exactly one
    /// `HydratedEntry` per input entry, in the same order.
    #[tracing::instrument(
        name = "usecase.hydrate_selection.execute",
        skip_all,
        fields(entries = entries.len())
    )]
    pub async fn execute(&self, entries: &[SelectionEntry]) -> Vec<HydratedEntry> {
        let mut seen = HashSet::new();
        let distinct: Vec<ItemId> = entries
            .iter()
            .map(|entry| entry.item_id)
            .filter(|item_id| seen.insert(*item_id))
            .collect();

        debug!(distinct = distinct.len(), "Fetching item details");

        let fetches = distinct.iter().map(|&item_id| async move {
            let outcome = self.catalog.fetch_item(item_id).await;
            (item_id, outcome)
        });
        let settled = join_all(fetches).await;

        let mut outcomes: HashMap<ItemId, HydrationStatus> = HashMap::with_capacity(settled.len());
        for (item_id, outcome) in settled {
            let status = match outcome {
                Ok(detail) if detail.id == item_id => HydrationStatus::Ready(detail),
                Ok(detail) => {
                    let err = CatalogError::Malformed(format!(
                        "requested item {item_id}, received item {}",
                        detail.id
                    ));
                    warn!(item_id = %item_id, error = %err, "Catalog returned a different item");
                    HydrationStatus::Failed(err.to_string())
                }
                Err(err) => {
                    warn!(item_id = %item_id, error = %err, "Failed to fetch item detail");
                    HydrationStatus::Failed(err.to_string())
                }
            };
            outcomes.insert(item_id, status);
        }

        entries
            .iter()
            .map(|entry| {
                let status = outcomes
                    .get(&entry.item_id)
                    .cloned()
                    .unwrap_or(HydrationStatus::Pending);
                HydratedEntry::with_status(*entry, status)
            })
            .collect()
    }
}
