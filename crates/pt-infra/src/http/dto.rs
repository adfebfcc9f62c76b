//! Wire shapes of the marketplace API.

use serde::{Deserialize, Serialize};

/// Every response is wrapped as `{status, message, data}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemPayload {
    pub data: Option<ItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemDto {
    pub id_hewan: i64,
    #[serde(default)]
    pub berat: serde_json::Value,
    #[serde(default)]
    pub umur: Option<f64>,
    pub harga: f64,
    #[serde(default)]
    pub kategori: Option<String>,
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
    pub status_hewan: String,
    pub id_penjual: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrderPayload {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderBody {
    pub pembayaran: &'static str,
    pub detail_transaksi: Vec<OrderLineBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderLineBody {
    pub hewan_id: i64,
}
