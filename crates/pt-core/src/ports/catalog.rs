use async_trait::async_trait;

use crate::catalog::ItemRecord;
use crate::ids::ItemId;
use crate::ports::errors::CatalogError;

#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetches the authoritative detail of one listing.
    async fn fetch_item(&self, item_id: ItemId) -> Result<ItemRecord, CatalogError>;
}
