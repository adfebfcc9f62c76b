//! Pasar Ternak application layer
//!
//! Cart and checkout use cases orchestrated over the ports declared in
//! `pt-core`. Nothing here knows about HTTP, files or terminals.

pub mod usecases;

pub use usecases::cart::{
    AddToCart, HydrateSelection, LocalSelectionStore, SelectionStoreError, SelectionViewModel,
};
pub use usecases::checkout::{CheckoutGate, CheckoutOutcome, CheckoutSettings};
