//! Layout of the persisted selection record.
//!
//! The record is a JSON array of `{"hewanId": <int>}` objects. Order is
//! significant and duplicates are kept.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// Default name of the durable record holding the selection.
pub const DEFAULT_RECORD_NAME: &str = "cart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSelectionItem {
    #[serde(rename = "hewanId")]
    hewan_id: ItemId,
}

/// Decodes a persisted payload into the ordered item ids it holds.
pub fn decode_selection(payload: &str) -> Result<Vec<ItemId>, serde_json::Error> {
    let items: Vec<StoredSelectionItem> = serde_json::from_str(payload)?;
    Ok(items.into_iter().map(|item| item.hewan_id).collect())
}

/// Encodes the ordered item ids into the persisted payload.
pub fn encode_selection(ids: &[ItemId]) -> Result<String, serde_json::Error> {
    let items: Vec<StoredSelectionItem> = ids
        .iter()
        .map(|&hewan_id| StoredSelectionItem { hewan_id })
        .collect();
    serde_json::to_string(&items)
}
