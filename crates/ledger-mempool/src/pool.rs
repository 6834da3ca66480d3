use std::collections::{HashMap, HashSet};

use ledger_transaction::Transaction;

use crate::error::AdmissionError;

/// Ordered pending-transaction pool with a dedup set and a per-sender nonce
/// table.
///
/// `Mempool::admit` performs steps 1-4 of the admission pipeline (verify,
/// nonce check, insert); gossiping the transaction to peers (step 5) and
/// computing the expected block index (step 6) are the caller's
/// responsibility — the mempool has no notion of peers or chain height.
#[derive(Debug, Default)]
pub struct Mempool {
    pending_transactions: Vec<Transaction>,
    transaction_pool: HashSet<String>,
    nonce_table: HashMap<String, u64>,
}

impl Mempool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify and admit a locally submitted transaction. Returns the
    /// normalized transaction that was inserted.
    pub fn admit(
        &mut self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
        nonce: u64,
        signature_hex: impl Into<String>,
        public_key_pem: impl Into<String>,
    ) -> Result<Transaction, AdmissionError> {
        let sender = sender.into();
        let tx = Transaction::new(
            sender.clone(),
            receiver,
            amount,
            nonce,
            signature_hex,
            public_key_pem,
        )
        .normalized();

        let signing_bytes = tx.canonical_signing_bytes()?;
        ledger_crypto::verify(&tx.public_key, &signing_bytes, &tx.signature)
            .map_err(|_| AdmissionError::InvalidSignature)?;

        if let Some(&last) = self.nonce_table.get(&sender) {
            if nonce <= last {
                return Err(AdmissionError::StaleNonce {
                    submitted: nonce,
                    last,
                });
            }
        }

        let key = tx.canonical_full_json()?;
        self.pending_transactions.push(tx.clone());
        self.transaction_pool.insert(key);
        self.nonce_table.insert(sender, nonce);

        tracing::debug!(sender = %tx.sender, nonce, "admitted transaction");
        Ok(tx)
    }

    /// Idempotent gossip-receive path: deduplicate by canonical full JSON.
    /// Returns `true` if `tx` was new and has been inserted, `false` if it
    /// was a duplicate (silently dropped, per the reference behavior).
    ///
    /// No signature or nonce check is performed here — the transaction is
    /// assumed to have been admitted by its origin node; it is re-verified
    /// independently when a block containing it reaches the chain
    /// validator.
    pub fn receive_gossip_transaction(
        &mut self,
        tx: Transaction,
    ) -> Result<bool, AdmissionError> {
        let tx = tx.normalized();
        let key = tx.canonical_full_json()?;
        if self.transaction_pool.contains(&key) {
            return Ok(false);
        }
        self.transaction_pool.insert(key);
        self.pending_transactions.push(tx);
        Ok(true)
    }

    /// Snapshot and drain all pending transactions, in admission order, for
    /// the block builder. Does not touch the dedup set or nonce table —
    /// confirmed transactions are removed later via
    /// [`Mempool::sync_transaction_pool`].
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending_transactions)
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending_transactions
    }

    pub fn len(&self) -> usize {
        self.pending_transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_transactions.is_empty()
    }

    pub fn last_nonce(&self, sender: &str) -> Option<u64> {
        self.nonce_table.get(sender).copied()
    }

    /// Reconcile the pool against the set of transactions confirmed on
    /// chain: remove confirmed entries from the dedup set, and prune
    /// `pending_transactions` to only entries still present in it. Order
    /// among survivors is preserved.
    pub fn sync_transaction_pool(
        &mut self,
        confirmed: &HashSet<String>,
    ) -> Result<(), AdmissionError> {
        for key in confirmed {
            self.transaction_pool.remove(key);
        }

        let mut retained = Vec::with_capacity(self.pending_transactions.len());
        for tx in std::mem::take(&mut self.pending_transactions) {
            let key = tx.canonical_full_json()?;
            if self.transaction_pool.contains(&key) {
                retained.push(tx);
            }
        }
        self.pending_transactions = retained;
        Ok(())
    }
}
