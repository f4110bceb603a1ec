//! State store adapter - the single-key get/put contract the ledger offers.
//!
//! Every other layer talks to the ledger only through [`StateStore`]. The
//! contract is narrow: per-key atomic reads and writes, no
//! ordering across keys, no transactions, no range scans.
//!
//! ## Example
//!
//! ```ignore
//! use budget_ledger::{InMemoryStateStore, StateStore};
//!
//! let store = InMemoryStateStore::new();
//! store.put("p1", br#"{"projectId":"p1"}"#.to_vec())?;
//! assert!(store.get("p1")?.is_some());
//! ```

mod in_memory;

use std::sync::Arc;

use crate::error::StoreError;

/// Single-key get/put over the ledger's shared key space.
pub trait StateStore: Send + Sync {
    /// Read the value under `key`. `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrite the value under `key`.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

pub use in_memory::InMemoryStateStore;
