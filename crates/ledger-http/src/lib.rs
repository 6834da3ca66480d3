//! Thin `axum` adapter over `ledger_node::Engine`. Every handler parses its
//! request, calls exactly one engine method, and maps the result to a
//! response — no business logic lives here.

pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;

pub use state::{AppState, SharedState};

/// Build the router over a given shared engine state. Exposed separately
/// from `main` so integration tests can mount it on an in-process listener.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/mine_block", get(routes::chain::mine_block))
        .route("/get_chain", get(routes::chain::get_chain))
        .route("/is_valid", get(routes::chain::is_valid))
        .route("/add_transaction", post(routes::transaction::add_transaction))
        .route("/sign_transaction", post(routes::transaction::sign_transaction))
        .route("/connect_node", post(routes::peer::connect_node))
        .route("/get_nodes", get(routes::peer::get_nodes))
        .route("/replace_chain", get(routes::chain::replace_chain))
        .route("/receive_transaction", post(routes::transaction::receive_transaction))
        .route("/receive_block", post(routes::chain::receive_block))
        .route("/apply_consensus", get(routes::chain::apply_consensus))
        .route("/generate_keys", get(routes::keys::generate_keys))
        .with_state(state)
}
