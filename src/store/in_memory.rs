//! InMemoryStateStore - HashMap-backed ledger stand-in for tests and development.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::StateStore;
use crate::error::StoreError;

/// In-memory state store backed by a HashMap.
///
/// Clone-friendly via Arc: clones share the same key space, which is how
/// tests model a process restart over durable state.
#[derive(Clone, Default)]
pub struct InMemoryStateStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys ever written.
    ///
    /// Counts through a poisoned lock: puts never leave the map half-written,
    /// so the count stays accurate after a panicking holder.
    pub fn len(&self) -> usize {
        self.storage
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when no key has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for InMemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("get"))?;
        Ok(storage.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("put"))?;
        storage.insert(key.to_string(), value);
        Ok(())
    }
}
