use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use ledger_chain::Block;
use ledger_sync::ChainResponse;
use ledger_transaction::Transaction;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct MineBlockResponse {
    pub message: &'static str,
    pub index: u64,
    pub timestamp: String,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
    pub merkle_root: String,
    pub difficulty: u32,
    pub nonce: u64,
    pub block_time: f64,
    pub uncles: Vec<Block>,
}

/// `GET /mine_block`
pub async fn mine_block(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<MineBlockResponse>), ApiError> {
    let mut engine = state.engine.lock().await;
    let block = engine.mine_block().await?;

    Ok((
        StatusCode::OK,
        Json(MineBlockResponse {
            message: "Congratulations, you just mined a block!",
            index: block.index,
            timestamp: block.timestamp,
            previous_hash: block.previous_hash,
            transactions: block.transactions,
            merkle_root: block.merkleroot,
            difficulty: block.difficulty,
            nonce: block.nonce,
            block_time: block.block_time,
            uncles: block.uncles,
        }),
    ))
}

/// `GET /get_chain`
pub async fn get_chain(State(state): State<SharedState>) -> Json<ChainResponse> {
    let engine = state.engine.lock().await;
    let chain = engine.chain();
    Json(ChainResponse {
        chain: chain.blocks().to_vec(),
        length: chain.len(),
    })
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `GET /is_valid`
pub async fn is_valid(State(state): State<SharedState>) -> Json<MessageResponse> {
    let engine = state.engine.lock().await;
    let message = if engine.is_valid() {
        "Blockchain is valid"
    } else {
        "Blockchain is not valid"
    };
    Json(MessageResponse {
        message: message.to_string(),
    })
}

#[derive(Serialize)]
pub struct ReplaceChainResponse {
    pub is_chain_replaced: String,
    pub chain: Vec<Block>,
}

/// `GET /replace_chain`
pub async fn replace_chain(
    State(state): State<SharedState>,
) -> Result<Json<ReplaceChainResponse>, ApiError> {
    let mut engine = state.engine.lock().await;
    let replaced = engine.replace_chain().await?;
    Ok(Json(ReplaceChainResponse {
        is_chain_replaced: format!("Chain is replaced: {replaced}"),
        chain: engine.chain().blocks().to_vec(),
    }))
}

/// `POST /receive_block`
pub async fn receive_block(
    State(state): State<SharedState>,
    Json(block): Json<Block>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut engine = state.engine.lock().await;
    engine.receive_block(block)?;
    Ok(Json(MessageResponse {
        message: "Block received and added to chain".to_string(),
    }))
}

#[derive(Serialize)]
pub struct ConsensusResponse {
    pub message: &'static str,
    pub chain: Vec<Block>,
}

/// `GET /apply_consensus`
pub async fn apply_consensus(
    State(state): State<SharedState>,
) -> Result<Json<ConsensusResponse>, ApiError> {
    let mut engine = state.engine.lock().await;
    let outcome = engine.apply_consensus().await?;
    let message = match outcome {
        ledger_sync::ConsensusOutcome::Adopted => {
            "The chain was replaced by the longest one in the network."
        }
        ledger_sync::ConsensusOutcome::UnclesDiscovered(_) | ledger_sync::ConsensusOutcome::NoChange => {
            "This chain is authoritative. No consensus changes needed."
        }
    };
    Ok(Json(ConsensusResponse {
        message,
        chain: engine.chain().blocks().to_vec(),
    }))
}
