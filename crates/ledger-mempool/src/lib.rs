//! Ordered pending-transaction pool.
//!
//! Mirrors the reference node's two-structure pool: an ordered list
//! (`pending_transactions`) that preserves admission order, plus a dedup
//! set (`transaction_pool`) keyed by each transaction's canonical full JSON.
//! A companion nonce table enforces strictly-increasing nonces per sender at
//! admission time — chain validation re-derives this independently and does
//! not trust the mempool's view.

mod error;
mod pool;

pub use error::AdmissionError;
pub use pool::Mempool;
