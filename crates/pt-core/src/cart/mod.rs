//! Cart domain: selection entries, their persisted layout, and the
//! hydrated view derived from them.

mod entry;
mod hydrated;
pub mod record;

pub use entry::{Position, SelectionEntry};
pub use hydrated::{HydratedEntry, HydrationState, HydrationStatus};
pub use record::{decode_selection, encode_selection, DEFAULT_RECORD_NAME};
