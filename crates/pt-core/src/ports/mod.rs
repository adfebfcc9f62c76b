//! Port interfaces for the application layer
//!
//! Ports define the contract between the cart/checkout use cases and the
//! infrastructure that implements them (local storage, the remote catalog
//! and order service, the UI shell). Use cases only ever see these traits.

pub mod catalog;
pub mod errors;
pub mod order;
pub mod selection_storage;
pub mod ui_port;

pub use catalog::CatalogPort;
pub use errors::{CatalogError, OrderError, StorageError};
pub use order::OrderPort;
pub use selection_storage::SelectionStoragePort;
pub use ui_port::{NavigationPort, Notice, NoticeLevel, NotificationPort};
