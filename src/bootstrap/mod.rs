//! # Bootstrap
//!
//! Loads configuration, installs the tracing subscriber and assembles the
//! storefront from concrete adapters. No business decisions are made here.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use self::config::{apply_env_overrides, load_config, load_storefront_config};
pub use self::tracing::init_tracing_subscriber;
pub use self::wiring::{wire_storefront, Storefront, WiringError, WiringOptions};
