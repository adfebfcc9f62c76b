//! Order domain: payment method and the order request submitted at checkout.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// How the buyer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Bank transfer.
    Transfer,
    /// Cash on delivery.
    Cod,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "TRANSFER",
            Self::Cod => "COD",
        }
    }

    /// Interprets a payment picker value; an empty value means nothing was
    /// chosen yet.
    pub fn from_selection(raw: &str) -> Result<Option<Self>, UnknownPaymentMethod> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRANSFER" => Ok(Self::Transfer),
            "COD" => Ok(Self::Cod),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One purchased unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub item_id: ItemId,
}

/// Order submitted to the remote service.
///
/// Only [`crate::checkout::validate_checkout`] builds one, so a request can
/// never exist for an unresolved or unavailable selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    payment_method: PaymentMethod,
    line_items: Vec<OrderLine>,
}

impl OrderRequest {
    pub(crate) fn new(payment_method: PaymentMethod, line_items: Vec<OrderLine>) -> Self {
        Self {
            payment_method,
            line_items,
        }
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn line_items(&self) -> &[OrderLine] {
        &self.line_items
    }
}

/// Acknowledgement returned by the order service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_selection_treats_blank_as_missing() {
        assert_eq!(PaymentMethod::from_selection("").unwrap(), None);
        assert_eq!(PaymentMethod::from_selection("  ").unwrap(), None);
        assert_eq!(
            PaymentMethod::from_selection("cod").unwrap(),
            Some(PaymentMethod::Cod)
        );
        assert!(PaymentMethod::from_selection("CASH").is_err());
    }

    #[test]
    fn payment_method_serializes_to_wire_value() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Transfer).unwrap(),
            "\"TRANSFER\""
        );
    }
}
