//! Key-value persistence surface.
//!
//! The journal store only needs string keys and string values. Backends are
//! assumed durable but neither confidential nor tamper-proof, and give no
//! ordering guarantee beyond "last write wins" unless they override
//! [`KeyValueStore::apply`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{QuillError, Result};

/// One write in a batch passed to [`KeyValueStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvOp {
    Set { key: String, value: String },
    Remove { key: String },
}

impl KvOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        KvOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        KvOp::Remove { key: key.into() }
    }
}

/// Storage interface for the journal's persisted state.
///
/// All implementations must ensure:
/// - `get` after `set` returns the value written
/// - `remove` of an absent key succeeds
/// - Values are stored verbatim
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key.
    fn remove(&self, key: &str) -> Result<()>;

    /// Apply several writes in order.
    ///
    /// The default applies them one by one. Backends with transactions
    /// should override this so the batch lands all-or-nothing.
    fn apply(&self, ops: &[KvOp]) -> Result<()> {
        for op in ops {
            match op {
                KvOp::Set { key, value } => self.set(key, value)?,
                KvOp::Remove { key } => self.remove(key)?,
            }
        }
        Ok(())
    }
}

/// In-process store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the map, returning an error if the mutex is poisoned.
    fn lock_values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| QuillError::Storage("Memory store poisoned".to_string()))
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.lock_values().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock_values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock_values()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock_values()?.remove(key);
        Ok(())
    }

    fn apply(&self, ops: &[KvOp]) -> Result<()> {
        // One guard for the whole batch.
        let mut values = self.lock_values()?;
        for op in ops {
            match op {
                KvOp::Set { key, value } => {
                    values.insert(key.clone(), value.clone());
                }
                KvOp::Remove { key } => {
                    values.remove(key);
                }
            }
        }
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn apply(&self, ops: &[KvOp]) -> Result<()> {
        (**self).apply(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_apply_runs_in_order() {
        let store = MemoryStore::new();
        store
            .apply(&[
                KvOp::set("a", "1"),
                KvOp::set("b", "2"),
                KvOp::remove("a"),
                KvOp::set("b", "3"),
            ])
            .unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("3"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_arc_delegates() {
        let shared = std::sync::Arc::new(MemoryStore::new());
        let handle = shared.clone();
        handle.set("k", "v").unwrap();
        assert_eq!(shared.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_trait_object_safe() {
        fn _accepts_dyn(_store: &dyn KeyValueStore) {}
        _accepts_dyn(&MemoryStore::new());
    }
}
