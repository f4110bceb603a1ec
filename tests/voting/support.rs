//! Shared fixtures for the voting suite: seeded ledgers and a store that fails on demand.

use std::sync::Mutex;

use budget_ledger::{InMemoryStateStore, Ledger, LedgerConfig, StateStore, StoreError};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Wraps an in-memory store and refuses puts to one chosen key until healed.
pub struct FaultyStore {
    inner: InMemoryStateStore,
    failing_key: Mutex<Option<String>>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStateStore::new(),
            failing_key: Mutex::new(None),
        }
    }

    pub fn fail_puts_to(&self, key: &str) {
        *self.failing_key.lock().unwrap() = Some(key.to_string());
    }

    pub fn heal(&self) {
        *self.failing_key.lock().unwrap() = None;
    }
}

impl StateStore for FaultyStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if self.failing_key.lock().unwrap().as_deref() == Some(key) {
            return Err(StoreError::Unavailable {
                operation: "put",
                key: key.to_string(),
                reason: "injected fault".to_string(),
            });
        }
        self.inner.put(key, value)
    }
}

/// Project `p1` (green), `p2` (traffic); voters `v1`, `v2` may vote on green
/// projects, `v3` only on `p2`.
pub fn seed<S: StateStore>(ledger: &Ledger<S>) {
    ledger
        .add_project(r#"{"projectId":"p1","title":"Pocket park","category":"green","budget":12000}"#)
        .unwrap();
    ledger
        .add_project(r#"{"projectId":"p2","title":"Crosswalk","category":"traffic"}"#)
        .unwrap();
    ledger
        .add_voter(r#"{"voterId":"v1","allowedCategories":["green"]}"#)
        .unwrap();
    ledger
        .add_voter(r#"{"voterId":"v2","allowedCategories":["green"]}"#)
        .unwrap();
    ledger
        .add_voter(r#"{"voterId":"v3","allowedProjects":["p2"]}"#)
        .unwrap();
}

pub fn seeded_ledger(config: LedgerConfig) -> Ledger<InMemoryStateStore> {
    let ledger = Ledger::with_config(InMemoryStateStore::new(), config);
    seed(&ledger);
    ledger
}

pub fn vote_json(voter: &str, project: &str, percent: u32) -> String {
    format!(r#"{{"voterId":"{voter}","projectId":"{project}","votePercent":{percent}}}"#)
}
