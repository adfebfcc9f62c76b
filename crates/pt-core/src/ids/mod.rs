//! Identifier newtypes.
//!
//! Catalog identifiers are opaque integers assigned by the remote service.

mod id_macro;

use id_macro::impl_id;
use serde::{Deserialize, Serialize};

/// Identifier of a livestock listing in the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

/// Identifier of the seller owning a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(i64);

impl_id!(ItemId, SellerId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_parses_trimmed_integers() {
        assert_eq!(" 42 ".parse::<ItemId>().unwrap(), ItemId::new(42));
        assert!("abc".parse::<ItemId>().is_err());
    }

    #[test]
    fn item_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&ItemId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
