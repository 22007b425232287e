//! # Quill Core
//!
//! Core library for Quill - a private, optionally encrypted mood journal.
//!
//! This crate provides the journal domain logic, encryption and persistence
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: password key derivation and authenticated record sealing
//! - **storage**: key-value backends, wire format and the collection store
//! - **lock**: locked / unlocked session lifecycle
//! - **safety**: crisis-language detection

pub mod crypto;
pub mod error;
pub mod lock;
pub mod safety;
pub mod storage;

pub use error::{QuillError, Result};
pub use lock::{LockController, LockState};
pub use storage::{
    CollectionStore, EntryFilter, KeyValueStore, MemoryStore, Mood, Namespace, PlainEntry,
    SqliteStore,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
