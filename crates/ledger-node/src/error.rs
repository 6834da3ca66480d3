use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("admission rejected: {0}")]
    Admission(#[from] ledger_mempool::AdmissionError),

    #[error("incoming block is invalid against the current head")]
    InvalidBlock,

    #[error("chain error: {0}")]
    Chain(#[from] ledger_chain::ChainError),

    #[error("transaction error: {0}")]
    Transaction(#[from] ledger_transaction::TransactionError),

    #[error("crypto error: {0}")]
    Crypto(#[from] ledger_crypto::CryptoError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("nodes file missing or unparseable: {0}")]
    ConfigMissing(String),
}
