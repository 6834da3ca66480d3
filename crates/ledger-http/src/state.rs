use std::sync::Arc;

use ledger_node::Engine;
use tokio::sync::Mutex;

/// Shared application state, passed to every handler via axum's `State`
/// extractor. One `Engine` per process; handlers serialize access through
/// its mutex rather than splitting its fields apart.
pub struct AppState {
    pub engine: Mutex<Engine>,
}

pub type SharedState = Arc<AppState>;
