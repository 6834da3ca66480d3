use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ledger_node::Engine;
use ledger_transaction::Transaction;

use crate::error::ApiError;
use crate::routes::chain::MessageResponse;
use crate::state::SharedState;

const REQUIRED_TRANSACTION_KEYS: &[&str] =
    &["sender", "receiver", "amount", "nonce", "signature", "public_key"];

/// Reject a body missing any of `required` before it reaches a typed
/// extractor, matching `app.py`'s `all(key in ... for key in transaction_keys)`
/// check instead of axum's default 422 on a missing field.
fn require_keys(body: &Value, required: &[&str]) -> Result<(), ApiError> {
    let object = body.as_object().ok_or(ApiError::MalformedRequest)?;
    if required.iter().all(|key| object.contains_key(*key)) {
        Ok(())
    } else {
        Err(ApiError::MalformedRequest)
    }
}

#[derive(Debug, Deserialize)]
pub struct AddTransactionRequest {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    pub nonce: u64,
    pub signature: String,
    pub public_key: String,
}

/// `POST /add_transaction`
pub async fn add_transaction(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    require_keys(&body, REQUIRED_TRANSACTION_KEYS)?;
    let body: AddTransactionRequest =
        serde_json::from_value(body).map_err(|_| ApiError::MalformedRequest)?;

    let mut engine = state.engine.lock().await;
    let index = engine
        .admit_transaction(
            body.sender,
            body.receiver,
            body.amount,
            body.nonce,
            body.signature,
            body.public_key,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Transaction will be added to Block {index}"),
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SignTransactionRequest {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    pub nonce: u64,
    pub private_key: String,
}

#[derive(Serialize)]
pub struct SignTransactionResponse {
    pub signature: String,
}

/// `POST /sign_transaction`
pub async fn sign_transaction(
    Json(body): Json<SignTransactionRequest>,
) -> Result<Json<SignTransactionResponse>, ApiError> {
    let signature = Engine::sign_transaction(
        &body.sender,
        &body.receiver,
        body.amount,
        body.nonce,
        &body.private_key,
    )?;
    Ok(Json(SignTransactionResponse { signature }))
}

/// `POST /receive_transaction`
pub async fn receive_transaction(
    State(state): State<SharedState>,
    Json(tx): Json<Transaction>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut engine = state.engine.lock().await;
    let newly_added = engine.receive_transaction(tx)?;
    let message = if newly_added {
        "Transaction received and added to pool"
    } else {
        "Transaction already in pool"
    };
    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}
