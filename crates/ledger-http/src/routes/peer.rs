use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ConnectNodeRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ConnectNodeResponse {
    pub message: &'static str,
    pub total_nodes: usize,
}

/// `POST /connect_node`
pub async fn connect_node(
    State(state): State<SharedState>,
    Json(body): Json<ConnectNodeRequest>,
) -> (StatusCode, Json<ConnectNodeResponse>) {
    let mut engine = state.engine.lock().await;
    engine.connect_nodes(&body.nodes);

    (
        StatusCode::CREATED,
        Json(ConnectNodeResponse {
            message: "All nodes are now connected",
            total_nodes: engine.nodes().len(),
        }),
    )
}

#[derive(Serialize)]
pub struct GetNodesResponse {
    pub nodes: Vec<String>,
    pub total_nodes: usize,
}

/// `GET /get_nodes`
pub async fn get_nodes(State(state): State<SharedState>) -> Json<GetNodesResponse> {
    let engine = state.engine.lock().await;
    Json(GetNodesResponse {
        nodes: engine.nodes().to_vec(),
        total_nodes: engine.nodes().len(),
    })
}
