//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to commands)
//! - Storage (LocalStorage on web, in-memory on native)

pub mod input;
pub mod storage;

pub use input::Command;
pub use storage::{MemoryStore, RecordStore};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
