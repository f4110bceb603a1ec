//! Indexes - named, ordered key lists that make an index-less key space enumerable.
//!
//! The ledger can only fetch a value by its exact key. Each entity kind
//! therefore keeps one index record listing, in insertion order, the keys of
//! every instance stored through the repository. Listing a kind means
//! reading its index and fetching each key.
//!
//! Indexes are plain records in the same store as the data. Resetting one
//! empties the list but leaves the entities it pointed at untouched.

mod manager;

use std::fmt;

/// The indexes the ledger maintains, one per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexName {
    Users,
    Things,
    Projects,
    Voters,
    Votes,
}

impl IndexName {
    /// Every index the ledger knows about; what `resetIndexes` clears.
    pub const ALL: [IndexName; 5] = [
        IndexName::Users,
        IndexName::Things,
        IndexName::Projects,
        IndexName::Voters,
        IndexName::Votes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexName::Users => "users",
            IndexName::Things => "things",
            IndexName::Projects => "projects",
            IndexName::Voters => "voters",
            IndexName::Votes => "votes",
        }
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub use manager::IndexManager;
