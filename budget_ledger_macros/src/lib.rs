//! Derive macros for `budget_ledger`.

mod record;

use proc_macro::TokenStream;

/// Derive macro for the `Record` trait.
///
/// Binds an entity struct to the index it is enumerated through and to the
/// key scheme it is stored under.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(index = "Votes", prefix = "vote_")]
/// struct Vote {
///     #[record(key)]
///     voter_id: String,
///     #[record(key)]
///     project_id: String,
///     vote_percent: f64,
/// }
/// // key() == "vote_<voter_id>_<project_id>"
/// ```
///
/// Struct-level attributes:
/// - `index = "..."`: the `IndexName` variant (default: struct name + `s`)
/// - `prefix = "..."`: literal prepended to the key (default: none)
///
/// Field-level `#[record(key)]` marks the fields that make up the key, joined
/// with `_` in declaration order. Without any marked field, a field named
/// `id` is used.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
