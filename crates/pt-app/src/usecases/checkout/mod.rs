//! Checkout use cases

mod checkout_gate;

pub use checkout_gate::{CheckoutGate, CheckoutOutcome, CheckoutSettings};
