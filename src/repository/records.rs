//! RecordRepository - typed accessor for one entity kind.

use std::marker::PhantomData;

use tracing::warn;

use crate::codec;
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::index::IndexManager;
use crate::record::Record;
use crate::store::StateStore;

/// Typed repository wrapper for records of kind `R`.
pub struct RecordRepository<'a, S, R> {
    store: &'a S,
    config: &'a LedgerConfig,
    _marker: PhantomData<R>,
}

impl<'a, S: StateStore, R: Record> RecordRepository<'a, S, R> {
    pub fn new(store: &'a S, config: &'a LedgerConfig) -> Self {
        Self {
            store,
            config,
            _marker: PhantomData,
        }
    }

    /// Store a record under its key and append the key to `R::INDEX`.
    ///
    /// The record is readable by key as soon as the put lands; if the index
    /// append fails afterwards it stays readable but is not enumerable.
    pub fn store(&self, record: &R) -> Result<String, LedgerError> {
        let key = self.checked_key(record)?;
        let bytes = codec::encode(R::KIND, record)?;
        self.store.put(&key, bytes)?;
        IndexManager::new(self.store, self.config).append(R::INDEX, &key)?;
        Ok(key)
    }

    /// Overwrite a record in place without touching the index.
    pub fn update(&self, record: &R) -> Result<(), LedgerError> {
        let key = self.checked_key(record)?;
        let bytes = codec::encode(R::KIND, record)?;
        self.store.put(&key, bytes)?;
        Ok(())
    }

    /// Fetch a record by its full store key.
    pub fn get(&self, key: &str) -> Result<Option<R>, LedgerError> {
        match self.store.get(key)? {
            Some(bytes) => codec::decode(R::KIND, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Fetch a record by the parts its key is built from (prefix applied).
    pub fn get_by_id(&self, parts: &[&str]) -> Result<Option<R>, LedgerError> {
        self.get(&R::key_for(parts))
    }

    /// Like [`get_by_id`](Self::get_by_id), but absence is a `NotFound` error.
    pub fn require(&self, parts: &[&str]) -> Result<R, LedgerError> {
        let key = R::key_for(parts);
        self.get(&key)?.ok_or(LedgerError::NotFound { kind: R::KIND, key })
    }

    /// Every record of this kind, in index order.
    pub fn list(&self) -> Result<Vec<R>, LedgerError> {
        let keys = IndexManager::new(self.store, self.config).list(R::INDEX)?;
        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            match self.get(&key)? {
                Some(record) => records.push(record),
                None => warn!(index = %R::INDEX, key = %key, "indexed key has no record"),
            }
        }
        Ok(records)
    }

    /// The record's key, refused if it lands on a bookkeeping key.
    fn checked_key(&self, record: &R) -> Result<String, LedgerError> {
        let key = record.key();
        if self.config.is_reserved_key(&key) {
            return Err(LedgerError::decode(
                R::KIND,
                format!("key {key} is reserved for ledger bookkeeping"),
            ));
        }
        Ok(key)
    }

    /// Records matching a predicate, in index order. Linear in the index size.
    pub fn find(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, LedgerError> {
        let mut records = self.list()?;
        records.retain(|record| predicate(record));
        Ok(records)
    }

    /// Records whose owner field, as picked by `owner`, equals `value`.
    pub fn list_by_owner<F>(&self, owner: F, value: &str) -> Result<Vec<R>, LedgerError>
    where
        F: Fn(&R) -> &str,
    {
        self.find(&|record| owner(record) == value)
    }
}
