use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("signature does not verify against the submitted public key")]
    InvalidSignature,

    #[error("nonce {submitted} is not greater than last accepted nonce {last} for this sender")]
    StaleNonce { submitted: u64, last: u64 },

    #[error("failed to canonicalize transaction: {0}")]
    Canonicalization(#[from] ledger_transaction::TransactionError),
}
