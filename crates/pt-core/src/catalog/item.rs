use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, SellerId};

/// Image shown when a listing has no photo.
pub const FALLBACK_PHOTO: &str = "/domba.svg";

/// Availability of a listing as reported by the remote catalog.
///
/// 目录服务返回的可售状态。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AvailabilityStatus {
    /// The listing can still be ordered.
    Available,
    /// Any other status the service reports (sold, reserved, ...).
    Other(String),
}

impl AvailabilityStatus {
    /// Wire value of the availability sentinel.
    pub const AVAILABLE: &'static str = "TERSEDIA";

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => Self::AVAILABLE,
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for AvailabilityStatus {
    fn from(raw: String) -> Self {
        if raw == Self::AVAILABLE {
            Self::Available
        } else {
            Self::Other(raw)
        }
    }
}

impl From<&str> for AvailabilityStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<AvailabilityStatus> for String {
    fn from(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Available => AvailabilityStatus::AVAILABLE.to_string(),
            AvailabilityStatus::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoritative listing detail fetched from the catalog.
///
/// Never persisted locally: it is re-fetched on every cart load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    /// Weight in kilograms, kept verbatim as the service formats it.
    pub weight: String,
    /// Age in years.
    pub age: u32,
    /// Price in whole rupiah.
    pub price: u64,
    pub category: String,
    pub description: String,
    /// Photo file name; empty when the listing has none.
    pub photo_ref: String,
    pub availability: AvailabilityStatus,
    pub seller_id: SellerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemRecord {
    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    /// Public URL of the listing photo under `media_base_url`.
    pub fn photo_url(&self, media_base_url: &str) -> String {
        if self.photo_ref.is_empty() {
            return FALLBACK_PHOTO.to_string();
        }
        format!(
            "{}/hewan_picture/{}",
            media_base_url.trim_end_matches('/'),
            self.photo_ref
        )
    }

    /// Short label used in listings, e.g. `Sapi #12`.
    pub fn title(&self) -> String {
        format!("{} #{}", self.category, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_item;

    #[test]
    fn availability_round_trips_through_wire_string() {
        assert_eq!(AvailabilityStatus::from("TERSEDIA"), AvailabilityStatus::Available);
        assert_eq!(
            AvailabilityStatus::from("TERJUAL"),
            AvailabilityStatus::Other("TERJUAL".into())
        );
        assert_eq!(String::from(AvailabilityStatus::Available), "TERSEDIA");
    }

    #[test]
    fn availability_sentinel_is_case_sensitive() {
        assert!(!AvailabilityStatus::from("tersedia").is_available());
    }

    #[test]
    fn photo_url_falls_back_when_photo_missing() {
        let mut item = sample_item(1, 100, "TERSEDIA");
        item.photo_ref.clear();
        assert_eq!(item.photo_url("http://api"), FALLBACK_PHOTO);

        item.photo_ref = "sapi.png".into();
        assert_eq!(item.photo_url("http://api/"), "http://api/hewan_picture/sapi.png");
    }
}
