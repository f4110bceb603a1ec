//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use serde_json::{json, Value};

use budget_ledger::{http, Chaincode, InMemoryStateStore};

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let chaincode = Arc::new(Chaincode::new(InMemoryStateStore::new()));
    let app = http::router(chaincode);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post(client: &reqwest::Client, url: String, args: &[&str]) -> (u16, Value) {
    let resp = client.post(url).json(&args).send().await.unwrap();
    let status = resp.status().as_u16();
    let body = resp.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn health_lists_operations() {
    let base = start_server().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let invoke = body["invoke"].as_array().unwrap();
    assert!(invoke.contains(&json!("vote")));
    let query = body["query"].as_array().unwrap();
    assert!(query.contains(&json!("getVotesByProjectID")));
}

#[tokio::test]
async fn invoke_then_query() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let (status, body) = post(
        &client,
        format!("{base}/invoke/addProject"),
        &[r#"{"projectId":"p1","title":"Park","category":"green"}"#],
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, Value::Null);

    let (status, _) = post(
        &client,
        format!("{base}/invoke/addVoter"),
        &[r#"{"voterId":"v1","allowedCategories":["green"]}"#],
    )
    .await;
    assert_eq!(status, 200);

    let (status, _) = post(
        &client,
        format!("{base}/invoke/vote"),
        &[r#"{"voterId":"v1","projectId":"p1","votePercent":20}"#],
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = post(&client, format!("{base}/query/getProject"), &["p1"]).await;
    assert_eq!(status, 200);
    assert_eq!(body["costCovered"], 20.0);
}

#[tokio::test]
async fn errors_carry_status_codes() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let (status, body) = post(&client, format!("{base}/query/getVoter"), &["ghost"]).await;
    assert_eq!(status, 404);
    assert!(body["error"].is_string());

    let (status, _) = post(&client, format!("{base}/invoke/addVoter"), &["not json"]).await;
    assert_eq!(status, 400);

    let (status, _) = post(&client, format!("{base}/invoke/dropTables"), &[]).await;
    assert_eq!(status, 404);

    let (status, _) = post(&client, format!("{base}/query/getVoteForProjectByVoter"), &["p1"]).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn ineligible_vote_is_forbidden() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    post(&client, format!("{base}/invoke/addProject"), &[r#"{"projectId":"p1","title":"Park"}"#]).await;
    post(&client, format!("{base}/invoke/addVoter"), &[r#"{"voterId":"v1"}"#]).await;

    let (status, body) = post(
        &client,
        format!("{base}/invoke/vote"),
        &[r#"{"voterId":"v1","projectId":"p1","votePercent":10}"#],
    )
    .await;
    assert_eq!(status, 403);
    assert!(body["error"].as_str().unwrap().contains("v1"));
}
