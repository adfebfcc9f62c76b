use serde::Serialize;

use crate::cart::{Position, SelectionEntry};
use crate::catalog::ItemRecord;
use crate::ids::ItemId;

/// Coarse hydration state of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HydrationState {
    Pending,
    Ready,
    Failed,
}

/// Outcome of hydrating one entry. `Ready` and `Failed` are exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HydrationStatus {
    Pending,
    Ready(ItemRecord),
    Failed(String),
}

impl HydrationStatus {
    pub fn state(&self) -> HydrationState {
        match self {
            Self::Pending => HydrationState::Pending,
            Self::Ready(_) => HydrationState::Ready,
            Self::Failed(_) => HydrationState::Failed,
        }
    }
}

/// A selection entry enriched with its authoritative detail (or the reason
/// it could not be fetched). Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydratedEntry {
    pub item_id: ItemId,
    pub position: Position,
    pub status: HydrationStatus,
}

impl HydratedEntry {
    pub fn pending(entry: SelectionEntry) -> Self {
        Self::with_status(entry, HydrationStatus::Pending)
    }

    pub fn with_status(entry: SelectionEntry, status: HydrationStatus) -> Self {
        Self {
            item_id: entry.item_id,
            position: entry.position,
            status,
        }
    }

    pub fn entry(&self) -> SelectionEntry {
        SelectionEntry::new(self.item_id, self.position)
    }

    pub fn state(&self) -> HydrationState {
        self.status.state()
    }

    pub fn detail(&self) -> Option<&ItemRecord> {
        match &self.status {
            HydrationStatus::Ready(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn fetch_error(&self) -> Option<&str> {
        match &self.status {
            HydrationStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == HydrationState::Ready
    }

    /// Ready and reported orderable by the catalog.
    pub fn is_available(&self) -> bool {
        self.detail().is_some_and(ItemRecord::is_available)
    }
}
