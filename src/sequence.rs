//! ID allocator - per-index counters minting identifiers for records without one.
//!
//! Counters are ledger records, not process memory, so identifiers keep
//! increasing across restarts. The bump is a read-modify-write of one key and
//! relies on the platform serializing conflicting transactions.

use tracing::debug;

use crate::codec;
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::index::IndexName;
use crate::store::StateStore;

const KIND: &str = "sequence counter";

pub struct IdAllocator<'a, S> {
    store: &'a S,
    config: &'a LedgerConfig,
}

impl<'a, S: StateStore> IdAllocator<'a, S> {
    pub fn new(store: &'a S, config: &'a LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Last value handed out for `index`; 0 if none yet.
    pub fn current(&self, index: IndexName) -> Result<u64, LedgerError> {
        match self.store.get(&self.config.sequence_key(index))? {
            Some(bytes) => codec::decode(KIND, &bytes),
            None => Ok(0),
        }
    }

    /// Bump the counter of `index` and return `<index><counter>`, e.g. `users7`.
    pub fn next_id(&self, index: IndexName) -> Result<String, LedgerError> {
        let next = self
            .current(index)?
            .checked_add(1)
            .ok_or_else(|| LedgerError::decode(KIND, format!("counter for {index} is exhausted")))?;
        self.store
            .put(&self.config.sequence_key(index), codec::encode(KIND, &next)?)?;

        let id = format!("{}{}", index, next);
        debug!(%index, id = %id, "minted id");
        Ok(id)
    }
}
