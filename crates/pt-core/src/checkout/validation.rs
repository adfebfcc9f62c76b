use crate::cart::{HydratedEntry, Position};
use crate::order::{OrderLine, OrderRequest, PaymentMethod};

use super::CheckoutFailure;

/// Checks the checkout preconditions and builds the order request.
///
/// Preconditions are checked in order and the first failing one is
/// reported:
/// 1. a payment method is selected,
/// 2. the selection is non-empty,
/// 3. every entry is hydrated (no pending or failed fetch),
/// 4. every entry is available.
///
/// The request keeps one line per entry, in selection order, duplicates
/// included.
pub fn validate_checkout(
    payment_method: Option<PaymentMethod>,
    entries: &[HydratedEntry],
) -> Result<OrderRequest, CheckoutFailure> {
    let payment_method = payment_method.ok_or(CheckoutFailure::PaymentMethodRequired)?;

    if entries.is_empty() {
        return Err(CheckoutFailure::EmptySelection);
    }

    let unresolved = positions_where(entries, |entry| !entry.is_ready());
    if !unresolved.is_empty() {
        return Err(CheckoutFailure::UnresolvedItems {
            positions: unresolved,
        });
    }

    let unavailable = positions_where(entries, |entry| !entry.is_available());
    if !unavailable.is_empty() {
        return Err(CheckoutFailure::UnavailableItems {
            positions: unavailable,
        });
    }

    let line_items = entries
        .iter()
        .map(|entry| OrderLine {
            item_id: entry.item_id,
        })
        .collect();

    Ok(OrderRequest::new(payment_method, line_items))
}

fn positions_where(
    entries: &[HydratedEntry],
    predicate: impl Fn(&HydratedEntry) -> bool,
) -> Vec<Position> {
    entries
        .iter()
        .filter(|entry| predicate(entry))
        .map(|entry| entry.position)
        .collect()
}
