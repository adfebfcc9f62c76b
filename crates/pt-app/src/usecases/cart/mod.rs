//! Cart use cases
//!
//! ```text
//! [detail view] --AddToCart--> LocalSelectionStore
//!                                   |
//! [cart view]  SelectionViewModel --read--+
//!                    |
//!              HydrateSelection --CatalogPort (one fetch per distinct id)
//! ```

mod add_to_cart;
mod hydrate_selection;
mod selection_store;
mod view_model;

pub use add_to_cart::AddToCart;
pub use hydrate_selection::HydrateSelection;
pub use selection_store::{LocalSelectionStore, SelectionStoreError};
pub use view_model::{HydrationBatch, HydrationResult, SelectionViewModel};
