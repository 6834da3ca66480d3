use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Single conversion point from every engine-level error to an HTTP
/// response, mirroring `sp_node::error::NodeError`'s `#[from]` shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("some elements of the transaction are missing")]
    MalformedRequest,

    #[error(transparent)]
    Engine(#[from] ledger_node::EngineError),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MalformedRequest => StatusCode::BAD_REQUEST,
            ApiError::Engine(ledger_node::EngineError::Admission(_)) => StatusCode::BAD_REQUEST,
            ApiError::Engine(ledger_node::EngineError::InvalidBlock) => StatusCode::BAD_REQUEST,
            ApiError::Engine(ledger_node::EngineError::Crypto(_)) => StatusCode::BAD_REQUEST,
            ApiError::Engine(ledger_node::EngineError::Transaction(_)) => StatusCode::BAD_REQUEST,
            ApiError::Engine(ledger_node::EngineError::Chain(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
