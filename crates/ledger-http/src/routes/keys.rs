use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
pub struct GenerateKeysResponse {
    pub private_key: String,
    pub public_key: String,
}

/// `GET /generate_keys`
pub async fn generate_keys() -> Result<Json<GenerateKeysResponse>, ApiError> {
    let keys = ledger_crypto::generate_keypair().map_err(ledger_node::EngineError::from)?;
    Ok(Json(GenerateKeysResponse {
        private_key: keys.private_key_pem,
        public_key: keys.public_key_pem,
    }))
}
