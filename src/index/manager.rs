use tracing::{debug, info};

use super::IndexName;
use crate::codec;
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::store::StateStore;

const KIND: &str = "index";

/// Reads and writes index records through a [`StateStore`].
///
/// Append is a read-modify-write of a single key; two unserialized callers
/// appending to the same index can lose one of the keys.
pub struct IndexManager<'a, S> {
    store: &'a S,
    config: &'a LedgerConfig,
}

impl<'a, S: StateStore> IndexManager<'a, S> {
    pub fn new(store: &'a S, config: &'a LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Append `key` to `index`, returning the new length. Duplicates are kept.
    pub fn append(&self, index: IndexName, key: &str) -> Result<usize, LedgerError> {
        let mut keys = self.list(index)?;
        keys.push(key.to_string());
        self.write(index, &keys)?;
        debug!(%index, key, len = keys.len(), "appended to index");
        Ok(keys.len())
    }

    /// The keys of `index` in insertion order. An index never written is empty.
    pub fn list(&self, index: IndexName) -> Result<Vec<String>, LedgerError> {
        match self.store.get(&self.config.index_key(index))? {
            Some(bytes) => codec::decode(KIND, &bytes),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite `index` with an empty list.
    pub fn reset(&self, index: IndexName) -> Result<(), LedgerError> {
        self.write(index, &[])?;
        info!(%index, "index reset");
        Ok(())
    }

    /// Reset every index in [`IndexName::ALL`].
    pub fn reset_all(&self) -> Result<(), LedgerError> {
        for index in IndexName::ALL {
            self.reset(index)?;
        }
        Ok(())
    }

    fn write(&self, index: IndexName, keys: &[String]) -> Result<(), LedgerError> {
        let bytes = codec::encode(KIND, keys)?;
        self.store.put(&self.config.index_key(index), bytes)?;
        Ok(())
    }
}
