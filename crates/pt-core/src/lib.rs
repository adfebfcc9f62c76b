//! # pt-core
//!
//! Core domain models and ports for the Pasar Ternak cart and checkout engine.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod ids;
pub mod order;
pub mod ports;

// Re-export commonly used types at the crate root
pub use cart::{HydratedEntry, HydrationState, HydrationStatus, Position, SelectionEntry};
pub use catalog::{AvailabilityStatus, ItemRecord};
pub use checkout::{CheckoutFailure, CheckoutState};
pub use config::StorefrontConfig;
pub use ids::{ItemId, SellerId};
pub use order::{OrderReceipt, OrderRequest, PaymentMethod};
