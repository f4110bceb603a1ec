//! HTTP transport for the chaincode entries.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /invoke/:function`: body = JSON array of string arguments; `null` on success.
//! - `POST /query/:function`: body = JSON array of string arguments; the query result.
//! - `GET /health`: `{ "ok": true, "invoke": [...], "query": [...] }`.
//!
//! Errors come back as `{ "error": "..." }` with the error's status code.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use budget_ledger::{http, Chaincode, InMemoryStateStore};
//!
//! let chaincode = Arc::new(Chaincode::new(InMemoryStateStore::new()));
//! http::serve(chaincode, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::dispatch::{Chaincode, Entry, InvokeOp, QueryOp, Request};
use crate::eligibility::EligibilityRule;
use crate::store::StateStore;

/// Build an axum `Router` serving the given chaincode.
pub fn router<S, E>(chaincode: Arc<Chaincode<S, E>>) -> Router
where
    S: StateStore + 'static,
    E: EligibilityRule + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/invoke/:function", post(invoke_handler::<S, E>))
        .route("/query/:function", post(query_handler::<S, E>))
        .with_state(chaincode)
}

/// Serve the chaincode over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S, E>(chaincode: Arc<Chaincode<S, E>>, addr: &str) -> Result<(), std::io::Error>
where
    S: StateStore + 'static,
    E: EligibilityRule + 'static,
{
    let app = router(chaincode);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "chaincode listening");
    axum::serve(listener, app).await
}

async fn health_handler() -> impl IntoResponse {
    let invoke: Vec<&str> = InvokeOp::names().collect();
    let query: Vec<&str> = QueryOp::names().collect();
    Json(json!({ "ok": true, "invoke": invoke, "query": query }))
}

async fn invoke_handler<S, E>(
    State(chaincode): State<Arc<Chaincode<S, E>>>,
    Path(function): Path<String>,
    Json(args): Json<Vec<String>>,
) -> impl IntoResponse
where
    S: StateStore + 'static,
    E: EligibilityRule + 'static,
{
    respond(&chaincode, Entry::Invoke, function, args)
}

async fn query_handler<S, E>(
    State(chaincode): State<Arc<Chaincode<S, E>>>,
    Path(function): Path<String>,
    Json(args): Json<Vec<String>>,
) -> impl IntoResponse
where
    S: StateStore + 'static,
    E: EligibilityRule + 'static,
{
    respond(&chaincode, Entry::Query, function, args)
}

fn respond<S: StateStore, E: EligibilityRule>(
    chaincode: &Chaincode<S, E>,
    entry: Entry,
    function: String,
    args: Vec<String>,
) -> (StatusCode, Json<Value>) {
    let response = chaincode.handle(&Request {
        entry,
        function,
        args,
    });
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body))
}
