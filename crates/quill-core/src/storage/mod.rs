//! Journal persistence.
//!
//! - **kv**: string key-value surface and an in-memory backend
//! - **sqlite**: durable key-value backend
//! - **namespace**: per-user key layout
//! - **types**: entries, envelopes and filters
//! - **envelope**: JSON wire format of a collection
//! - **collection**: load, save and bulk re-encryption of one namespace

pub mod collection;
pub mod envelope;
pub mod kv;
pub mod namespace;
pub mod sqlite;
pub mod types;

pub use collection::CollectionStore;
pub use kv::{KeyValueStore, KvOp, MemoryStore};
pub use namespace::Namespace;
pub use sqlite::SqliteStore;
pub use types::{Collection, EncryptedEnvelope, EntryFilter, Mood, PlainEntry};
