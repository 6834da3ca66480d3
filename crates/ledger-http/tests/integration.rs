//! End-to-end scenarios driven over real HTTP against `ledger_http::router`,
//! covering the two scenarios that need two live nodes: peer consensus and
//! uncle backfill. Single-node scenarios are already covered at the engine
//! level by `ledger-node/tests/integration.rs`; this file focuses on what
//! only makes sense with sockets.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use ledger_node::Engine;
use ledger_sync::PeerRegistry;

async fn spawn_node() -> String {
    let state: ledger_http::SharedState = Arc::new(ledger_http::AppState {
        engine: Mutex::new(Engine::new(PeerRegistry::new())),
    });
    let app = ledger_http::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn mine(client: &reqwest::Client, base: &str) -> Value {
    client
        .get(format!("{base}/mine_block"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn chain_length(client: &reqwest::Client, base: &str) -> u64 {
    let body: Value = client
        .get(format!("{base}/get_chain"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["length"].as_u64().unwrap()
}

#[tokio::test]
async fn genesis_only_chain_is_valid_over_http() {
    let base = spawn_node().await;
    let client = reqwest::Client::new();

    assert_eq!(chain_length(&client, &base).await, 1);

    let body: Value = client
        .get(format!("{base}/is_valid"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "Blockchain is valid");
}

#[tokio::test]
async fn signed_transaction_is_mined_then_stale_nonce_is_rejected() {
    let base = spawn_node().await;
    let client = reqwest::Client::new();

    let keys: Value = client
        .get(format!("{base}/generate_keys"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let public_key = keys["public_key"].as_str().unwrap().to_string();
    let private_key = keys["private_key"].as_str().unwrap().to_string();

    let signed: Value = client
        .post(format!("{base}/sign_transaction"))
        .json(&json!({
            "sender": public_key,
            "receiver": "Bob",
            "amount": 10,
            "nonce": 1,
            "private_key": private_key,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let signature = signed["signature"].as_str().unwrap().to_string();

    let add_response = client
        .post(format!("{base}/add_transaction"))
        .json(&json!({
            "sender": public_key,
            "receiver": "Bob",
            "amount": 10,
            "nonce": 1,
            "signature": signature,
            "public_key": public_key,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(add_response.status(), 201);

    let block = mine(&client, &base).await;
    assert_eq!(chain_length(&client, &base).await, 2);
    assert_eq!(block["transactions"].as_array().unwrap().len(), 1);

    let retry = client
        .post(format!("{base}/add_transaction"))
        .json(&json!({
            "sender": public_key,
            "receiver": "Bob",
            "amount": 10,
            "nonce": 1,
            "signature": signature,
            "public_key": public_key,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(retry.status(), 400);
}

#[tokio::test]
async fn add_transaction_missing_key_is_rejected_as_malformed() {
    let base = spawn_node().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/add_transaction"))
        .json(&json!({
            "sender": "Alice",
            "receiver": "Bob",
            "amount": 10,
            "nonce": 1,
            "signature": "deadbeef",
            // "public_key" omitted
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn invalid_block_push_is_rejected() {
    let base = spawn_node().await;
    let client = reqwest::Client::new();

    let mut genesis: Value = client
        .get(format!("{base}/get_chain"))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap()["chain"][0]
        .clone();
    genesis["previous_hash"] = json!("not-the-real-hash");
    genesis["index"] = json!(2);

    let response = client
        .post(format!("{base}/receive_block"))
        .json(&genesis)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(chain_length(&client, &base).await, 1);
}

#[tokio::test]
async fn two_node_consensus_adopts_the_longer_chain() {
    let node_a = spawn_node().await;
    let node_b = spawn_node().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{node_b}/connect_node"))
        .json(&json!({ "nodes": [node_a] }))
        .send()
        .await
        .unwrap();

    mine(&client, &node_a).await;
    mine(&client, &node_a).await;
    mine(&client, &node_b).await;

    assert_eq!(chain_length(&client, &node_a).await, 3);
    assert_eq!(chain_length(&client, &node_b).await, 2);

    let consensus: Value = client
        .get(format!("{node_b}/apply_consensus"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        consensus["message"],
        "The chain was replaced by the longest one in the network."
    );
    assert_eq!(chain_length(&client, &node_b).await, 3);

    let valid: Value = client
        .get(format!("{node_b}/is_valid"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(valid["message"], "Blockchain is valid");
}

#[tokio::test]
async fn uncle_backfill_stapples_a_diverged_peer_block_into_the_next_mined_block() {
    let node_l = spawn_node().await;
    let node_p = spawn_node().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{node_l}/connect_node"))
        .json(&json!({ "nodes": [node_p] }))
        .send()
        .await
        .unwrap();

    for _ in 0..7 {
        mine(&client, &node_l).await;
    }
    for _ in 0..6 {
        mine(&client, &node_p).await;
    }
    assert_eq!(chain_length(&client, &node_l).await, 8);
    assert_eq!(chain_length(&client, &node_p).await, 7);

    client
        .get(format!("{node_l}/apply_consensus"))
        .send()
        .await
        .unwrap();

    let next_block = mine(&client, &node_l).await;
    let uncles = next_block["uncles"].as_array().unwrap();
    assert!(!uncles.is_empty());
    assert!(uncles.len() <= 2);
}
