//! Pasar Ternak
//!
//! Terminal storefront over the cart and checkout engine: configuration,
//! tracing, wiring and the command handlers used by the `pasar-ternak`
//! binary.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
pub mod commands;

pub use bootstrap::{wire_storefront, Storefront, WiringOptions};
