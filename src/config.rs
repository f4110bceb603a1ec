//! Ledger configuration: where bookkeeping records live and how repeat votes are treated.
//!
//! ```ignore
//! let config = LedgerConfig::from_json(r#"{ "duplicate_votes": "accumulate" }"#)?;
//! let chaincode = Chaincode::with_config(store, config);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::index::IndexName;

/// What a second vote by the same voter on the same project does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateVotePolicy {
    /// One vote per (voter, project). Resubmitting the identical vote resumes
    /// or no-ops; a different percentage is refused.
    #[default]
    Reject,
    /// Every submission is applied: the vote record is overwritten while the
    /// project's vote list and `costCovered` keep growing.
    Accumulate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    pub index_key_prefix: String,
    pub sequence_key_prefix: String,
    pub project_vote_prefix: String,
    pub duplicate_votes: DuplicateVotePolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            index_key_prefix: "_index_".to_string(),
            sequence_key_prefix: "_seq_".to_string(),
            project_vote_prefix: "projectvote_".to_string(),
            duplicate_votes: DuplicateVotePolicy::default(),
        }
    }
}

impl LedgerConfig {
    /// Parse a JSON configuration document. Absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, LedgerError> {
        serde_json::from_str(text).map_err(|e| LedgerError::decode("config", e))
    }

    pub fn with_duplicate_votes(mut self, policy: DuplicateVotePolicy) -> Self {
        self.duplicate_votes = policy;
        self
    }

    pub(crate) fn index_key(&self, index: IndexName) -> String {
        format!("{}{}", self.index_key_prefix, index)
    }

    pub(crate) fn sequence_key(&self, index: IndexName) -> String {
        format!("{}{}", self.sequence_key_prefix, index)
    }

    pub(crate) fn project_vote_key(&self, project_id: &str) -> String {
        format!("{}{}", self.project_vote_prefix, project_id)
    }

    /// True when `key` falls under one of the bookkeeping prefixes, so a
    /// record stored there would clobber an index, counter or vote list.
    pub(crate) fn is_reserved_key(&self, key: &str) -> bool {
        [
            &self.index_key_prefix,
            &self.sequence_key_prefix,
            &self.project_vote_prefix,
        ]
        .into_iter()
        .any(|prefix| !prefix.is_empty() && key.starts_with(prefix.as_str()))
    }
}
