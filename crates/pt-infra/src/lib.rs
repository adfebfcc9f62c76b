//! Infrastructure adapters for Pasar Ternak
//!
//! - `storage`: durable record storage behind [`SelectionStoragePort`]
//! - `http`: the marketplace REST API behind [`CatalogPort`] and [`OrderPort`]
//! - `fs`: platform data directory lookup
//!
//! [`SelectionStoragePort`]: pt_core::ports::SelectionStoragePort
//! [`CatalogPort`]: pt_core::ports::CatalogPort
//! [`OrderPort`]: pt_core::ports::OrderPort

pub mod fs;
pub mod http;
pub mod storage;
