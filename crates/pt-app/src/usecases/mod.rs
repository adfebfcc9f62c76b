//! Business logic use cases
//!
//! ```text
//! [detail view]  AddToCart ---------> LocalSelectionStore <----+
//! [cart view]    SelectionViewModel --(read, hydrate)          |
//! [cart view]    CheckoutGate --(validate, submit, clear)------+
//! ```

pub mod cart;
pub mod checkout;

#[cfg(test)]
pub(crate) mod test_support;
