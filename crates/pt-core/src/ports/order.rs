use async_trait::async_trait;

use crate::order::{OrderReceipt, OrderRequest};
use crate::ports::errors::OrderError;

#[async_trait]
pub trait OrderPort: Send + Sync {
    /// Submits the order. The service owns final acceptance.
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, OrderError>;
}
