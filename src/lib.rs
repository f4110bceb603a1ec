//! Derived indexes and multi-record consistency for a participatory-budgeting
//! ledger that only offers single-key get/put.
//!
//! Users register projects, voters cast percentage-weighted votes, and every
//! project keeps a running `costCovered` total. The ledger underneath has no
//! transactions, secondary indexes or field queries, so this crate supplies:
//!
//! - [`IndexManager`] and [`IdAllocator`]: ordered per-kind key lists and
//!   per-kind id counters, stored as ordinary ledger records;
//! - [`RecordRepository`] / [`Ledger`]: typed store/retrieve that keeps those
//!   indexes current, plus the domain lookups built on them;
//! - [`VoteCoordinator`]: the eligibility gate and the three-write vote commit;
//! - [`Chaincode`]: the `invoke`/`query` entries, routing named functions.
//!
//! ## Example
//!
//! ```ignore
//! use budget_ledger::{Chaincode, InMemoryStateStore};
//!
//! let chaincode = Chaincode::new(InMemoryStateStore::new());
//! chaincode.invoke("addProject", &[r#"{"projectId":"p1","title":"Park"}"#])?;
//! chaincode.invoke("addVoter", &[r#"{"voterId":"v1","allowedProjects":["p1"]}"#])?;
//! chaincode.invoke("vote", &[r#"{"voterId":"v1","projectId":"p1","votePercent":30}"#])?;
//! ```

// Lets `#[derive(Record)]` refer to `::budget_ledger` from inside this crate.
extern crate self as budget_ledger;

pub mod codec;
mod config;
mod dispatch;
mod eligibility;
mod entities;
mod error;
mod index;
mod record;
mod repository;
mod sequence;
mod store;
mod vote;

#[cfg(feature = "http")]
pub mod http;

pub use config::{DuplicateVotePolicy, LedgerConfig};
pub use dispatch::{Chaincode, Entry, InvokeOp, QueryOp, Request, Response};
pub use eligibility::{AllowListRule, EligibilityRule};
pub use entities::{Project, TestData, Thing, User, UserAuthenticationResult, Vote, Voter};
pub use error::{LedgerError, StoreError};
pub use index::{IndexManager, IndexName};
pub use record::Record;
pub use repository::{Ledger, RecordRepository};
pub use sequence::IdAllocator;
pub use store::{InMemoryStateStore, StateStore};
pub use vote::{CommitStep, StepOutcome, VoteCoordinator, VoteReceipt, VoteState};

// Re-export the derive macro under the trait's name.
pub use budget_ledger_macros::Record;
