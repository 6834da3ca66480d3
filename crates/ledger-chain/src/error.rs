use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain is empty")]
    Empty,

    #[error("block index {0} not found")]
    BlockNotFound(u64),

    #[error("merkle error: {0}")]
    Merkle(#[from] ledger_merkle::MerkleError),

    #[error("transaction error: {0}")]
    Transaction(#[from] ledger_transaction::TransactionError),

    #[error("failed to serialize block for hashing: {0}")]
    Serialization(#[from] serde_json::Error),
}
