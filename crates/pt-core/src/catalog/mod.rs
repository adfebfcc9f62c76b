//! Catalog domain: the authoritative listing record.

mod item;
mod price;

pub use item::{AvailabilityStatus, ItemRecord, FALLBACK_PHOTO};
pub use price::format_rupiah;
