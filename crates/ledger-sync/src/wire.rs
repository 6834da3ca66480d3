use serde::{Deserialize, Serialize};

use ledger_chain::Block;

/// Wire shape of `GET /get_chain`, reused as the response this node serves
/// and the response it parses when pulling a peer's chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}
