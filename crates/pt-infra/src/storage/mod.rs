//! Record storage adapters for the persisted selection.

mod file_selection_storage;
mod memory_selection_storage;

pub use file_selection_storage::FileSelectionStorage;
pub use memory_selection_storage::MemorySelectionStorage;
