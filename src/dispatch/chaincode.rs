//! Chaincode - the two entry points the hosting runtime calls.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use super::ops::{InvokeOp, QueryOp};
use crate::config::LedgerConfig;
use crate::eligibility::{AllowListRule, EligibilityRule};
use crate::error::LedgerError;
use crate::repository::Ledger;
use crate::store::StateStore;
use crate::vote::VoteCoordinator;

/// Routes invoke and query calls to a [`Ledger`].
///
/// Generic over the store `S` and the eligibility rule `E` consulted by
/// `vote` and `getProjectsForVoter`.
pub struct Chaincode<S, E = AllowListRule> {
    ledger: Ledger<S>,
    rule: E,
}

impl<S: StateStore> Chaincode<S, AllowListRule> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    pub fn with_config(store: S, config: LedgerConfig) -> Self {
        Self::with_rule(Ledger::with_config(store, config), AllowListRule)
    }
}

impl<S: StateStore, E: EligibilityRule> Chaincode<S, E> {
    pub fn with_rule(ledger: Ledger<S>, rule: E) -> Self {
        Self { ledger, rule }
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn votes(&self) -> VoteCoordinator<'_, S, E> {
        VoteCoordinator::new(&self.ledger, &self.rule)
    }

    /// Mutating entry. Returns no payload on success.
    pub fn invoke<A: AsRef<str>>(&self, function: &str, args: &[A]) -> Result<(), LedgerError> {
        info!(function, "invoke");
        let op = InvokeOp::from_name(function)?;
        op.check_arity(args)?;
        let arg = |i: usize| args[i].as_ref();

        match op {
            InvokeOp::Init => Ok(()),
            InvokeOp::ResetIndexes => self.ledger.reset_indexes(),
            InvokeOp::AddUser => self.ledger.add_user(arg(0), arg(1)).map(|_| ()),
            InvokeOp::AddTestdata => self.ledger.add_test_data(arg(0), arg(1), arg(2)),
            InvokeOp::CreateThing => self.ledger.create_thing(arg(0)),
            InvokeOp::AddProject => self.ledger.add_project(arg(0)),
            InvokeOp::AddVoter => self.ledger.add_voter(arg(0)),
            InvokeOp::Vote => self.votes().submit(arg(0)).map(|_| ()),
        }
    }

    /// Read-only entry. Returns the result as JSON bytes.
    pub fn query<A: AsRef<str>>(&self, function: &str, args: &[A]) -> Result<Vec<u8>, LedgerError> {
        let value = self.query_value(function, args)?;
        serde_json::to_vec(&value).map_err(|e| LedgerError::decode("query result", e))
    }

    /// Read-only entry, result as a JSON value.
    pub fn query_value<A: AsRef<str>>(&self, function: &str, args: &[A]) -> Result<Value, LedgerError> {
        info!(function, "query");
        let op = QueryOp::from_name(function)?;
        op.check_arity(args)?;
        let arg = |i: usize| args[i].as_ref();
        let ledger = &self.ledger;

        match op {
            QueryOp::GetUser => to_value(ledger.get_user(arg(0))?),
            QueryOp::AuthenticateAsUser => to_value(ledger.authenticate_as_user(arg(0), arg(1))?),
            QueryOp::GetThingsByUserId => to_value(ledger.get_things_by_user_id(arg(0))?),
            QueryOp::GetProject => to_value(ledger.get_project(arg(0))?),
            QueryOp::GetProjectsForVoter => {
                to_value(ledger.get_projects_for_voter(arg(0), &self.rule)?)
            }
            QueryOp::GetVoter => to_value(ledger.get_voter(arg(0))?),
            QueryOp::GetVoteForProjectByVoter => {
                to_value(ledger.get_vote_for_project_by_voter(arg(0), arg(1))?)
            }
            QueryOp::GetVotesByProjectId => to_value(ledger.get_votes_by_project_id(arg(0))?),
        }
    }

    /// Handle a transport-level request, folding errors into the response.
    pub fn handle(&self, request: &Request) -> Response {
        let result = match request.entry {
            Entry::Invoke => self
                .invoke(&request.function, request.args.as_slice())
                .map(|()| Value::Null),
            Entry::Query => self.query_value(&request.function, request.args.as_slice()),
        };

        match result {
            Ok(body) => Response { status: 200, body },
            Err(e) => Response {
                status: e.status_code(),
                body: json!({ "error": e.to_string() }),
            },
        }
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, LedgerError> {
    serde_json::to_value(value).map_err(|e| LedgerError::decode("query result", e))
}

/// Which entry a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Invoke,
    Query,
}

/// An inbound call from the hosting runtime.
///
/// ```json
/// { "entry": "query", "function": "getVoter", "args": ["v1"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub entry: Entry,
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Result of handling a [`Request`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// HTTP-style status code.
    pub status: u16,
    /// Query result, `null` for invokes, or `{ "error": ... }`.
    pub body: Value,
}
