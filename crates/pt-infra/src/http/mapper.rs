use chrono::{DateTime, Utc};

use pt_core::catalog::ItemRecord;
use pt_core::ids::{ItemId, SellerId};
use pt_core::order::OrderRequest;
use pt_core::ports::CatalogError;

use super::dto::{ItemDto, OrderBody, OrderLineBody};

// Largest integer an f64 represents exactly.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

pub(crate) fn item_from_dto(dto: ItemDto) -> Result<ItemRecord, CatalogError> {
    Ok(ItemRecord {
        id: ItemId::new(dto.id_hewan),
        weight: weight_text(&dto.berat),
        age: u32::try_from(whole_number(dto.umur.unwrap_or(0.0), "umur")?)
            .map_err(|_| CatalogError::Malformed("umur is out of range".to_string()))?,
        price: whole_number(dto.harga, "harga")?,
        category: dto.kategori.unwrap_or_default(),
        description: dto.deskripsi.unwrap_or_default(),
        photo_ref: dto.foto.unwrap_or_default(),
        availability: dto.status_hewan.into(),
        seller_id: SellerId::new(dto.id_penjual),
        created_at: timestamp(&dto.created_at, "createdAt")?,
        updated_at: timestamp(&dto.updated_at, "updatedAt")?,
    })
}

pub(crate) fn order_body(order: &OrderRequest) -> OrderBody {
    OrderBody {
        pembayaran: order.payment_method().as_str(),
        detail_transaksi: order
            .line_items()
            .iter()
            .map(|line| OrderLineBody {
                hewan_id: line.item_id.inner(),
            })
            .collect(),
    }
}

// The service sends weight as either a string or a number.
fn weight_text(raw: &serde_json::Value) -> String {
    match raw {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn whole_number(value: f64, field: &str) -> Result<u64, CatalogError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= MAX_EXACT {
        return Err(CatalogError::Malformed(format!(
            "{field} is not a non-negative whole number: {value}"
        )));
    }
    Ok(value as u64)
}

fn timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>, CatalogError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| CatalogError::Malformed(format!("{field} is not a timestamp: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> ItemDto {
        serde_json::from_value(serde_json::json!({
            "idHewan": 12,
            "berat": "45",
            "umur": 2,
            "harga": 3500000,
            "kategori": "Sapi",
            "deskripsi": "Sapi bali",
            "foto": "sapi.jpg",
            "statusHewan": "TERSEDIA",
            "idPenjual": 3,
            "createdAt": "2024-05-01T08:00:00.000Z",
            "updatedAt": "2024-05-02T08:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn maps_wire_item_to_record() {
        let record = item_from_dto(dto()).unwrap();
        assert_eq!(record.id, ItemId::new(12));
        assert_eq!(record.weight, "45");
        assert_eq!(record.age, 2);
        assert_eq!(record.price, 3_500_000);
        assert!(record.is_available());
        assert_eq!(record.seller_id, SellerId::new(3));
        assert!(record.created_at < record.updated_at);
    }

    #[test]
    fn numeric_weight_is_kept_as_text() {
        let mut raw = dto();
        raw.berat = serde_json::json!(45.5);
        assert_eq!(item_from_dto(raw).unwrap().weight, "45.5");
    }

    #[test]
    fn negative_or_fractional_price_is_malformed() {
        let mut raw = dto();
        raw.harga = -1.0;
        assert!(matches!(item_from_dto(raw), Err(CatalogError::Malformed(_))));

        let mut raw = dto();
        raw.harga = 10.5;
        assert!(matches!(item_from_dto(raw), Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let mut raw = dto();
        raw.created_at = "yesterday".into();
        assert!(matches!(item_from_dto(raw), Err(CatalogError::Malformed(_))));
    }
}
