//! Repository - typed store/retrieve over the ledger, kept enumerable through indexes.
//!
//! [`RecordRepository`] is the generic layer: store a [`Record`](crate::Record)
//! under its key and append the key to its kind's index, fetch by key, list a
//! kind in index order, or scan it for a field match. [`Ledger`] bundles the
//! store and configuration and adds the participatory-budgeting lookups on top.
//!
//! ## Example
//!
//! ```ignore
//! use budget_ledger::{InMemoryStateStore, Ledger, Thing};
//!
//! let ledger = Ledger::new(InMemoryStateStore::new());
//! ledger.records::<Thing>().store(&thing)?;
//! let owned = ledger.get_things_by_user_id("u1")?;
//! ```

mod ledger;
mod records;

pub use ledger::Ledger;
pub use records::RecordRepository;
