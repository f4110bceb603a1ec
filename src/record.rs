//! Record - binds an entity kind to its index and its key scheme.

use serde::{de::DeserializeOwned, Serialize};

use crate::index::IndexName;

/// Trait for entities stored through the repository.
///
/// Usually derived:
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(index = "Voters", prefix = "voter_")]
/// pub struct Voter {
///     #[record(key)]
///     pub voter_id: String,
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The index every stored instance is appended to.
    const INDEX: IndexName;

    /// Literal prepended to the key, keeping kinds that share identifiers apart.
    const KEY_PREFIX: &'static str;

    /// Human-readable kind name used in errors and logs.
    const KIND: &'static str;

    /// The store key of this instance.
    fn key(&self) -> String;

    /// Build a key from its identifying parts without an instance at hand.
    fn key_for(parts: &[&str]) -> String {
        format!("{}{}", Self::KEY_PREFIX, parts.join("_"))
    }
}
