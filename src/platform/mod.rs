//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pending direction slot, key names)
//! - Storage (file on native, LocalStorage on web)

pub mod input;
pub mod storage;

pub use input::{DirectionSlot, direction_for_key};
pub use storage::StorageError;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
