use std::sync::atomic::AtomicBool;

use ledger_chain::{Block, Chain, UnclePool};
use ledger_mempool::Mempool;
use ledger_sync::{ConsensusOutcome, PeerRegistry};
use ledger_transaction::Transaction;

use crate::error::EngineError;

/// The single aggregate owning a node's chain, mempool, uncle pool and peer
/// registry. One node process exclusively owns one `Engine`; the HTTP layer
/// is responsible for serializing access to it (a single mutual-exclusion
/// guard around the whole aggregate, per the concurrency model).
pub struct Engine {
    chain: Chain,
    mempool: Mempool,
    uncles: UnclePool,
    peers: PeerRegistry,
    difficulty: u32,
}

impl Engine {
    pub fn new(peers: PeerRegistry) -> Self {
        Self {
            chain: Chain::new(),
            mempool: Mempool::new(),
            uncles: UnclePool::new(),
            peers,
            difficulty: 1,
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn is_valid(&self) -> bool {
        self.chain.is_valid()
    }

    pub fn nodes(&self) -> &[String] {
        self.peers.peers()
    }

    /// Register peers, tolerant of a missing scheme on each entry. Returns
    /// the number newly added.
    pub fn connect_nodes(&mut self, endpoints: &[String]) -> usize {
        endpoints
            .iter()
            .filter(|endpoint| self.peers.register(endpoint))
            .count()
    }

    fn reconcile_mempool(&mut self) -> Result<(), EngineError> {
        let confirmed = self.chain.confirmed_transaction_keys()?;
        self.mempool.sync_transaction_pool(&confirmed)?;
        Ok(())
    }

    /// Admit a client-submitted transaction: verify, check nonce
    /// monotonicity, insert into the mempool, and gossip it to peers
    /// best-effort. Returns the 1-based index of the block it is expected
    /// to land in.
    pub async fn admit_transaction(
        &mut self,
        sender: String,
        receiver: String,
        amount: u64,
        nonce: u64,
        signature_hex: String,
        public_key_pem: String,
    ) -> Result<u64, EngineError> {
        let tx = self
            .mempool
            .admit(sender, receiver, amount, nonce, signature_hex, public_key_pem)?;

        ledger_sync::broadcast_transaction(self.peers.peers(), &tx).await;

        Ok(self.chain.tip().index + 1)
    }

    /// Idempotent gossip-receive path for a peer-pushed transaction.
    pub fn receive_transaction(&mut self, tx: Transaction) -> Result<bool, EngineError> {
        Ok(self.mempool.receive_gossip_transaction(tx)?)
    }

    /// Mine one block on top of the current head: drain the mempool,
    /// select eligible uncles, run the PoW search, assemble and append the
    /// block, adjust difficulty, gossip it, and reconcile the mempool.
    pub async fn mine_block(&mut self) -> Result<Block, EngineError> {
        let next_index = self.chain.tip().index + 1;
        let transactions = self.mempool.drain();
        let uncles = self.uncles.take_eligible(next_index);

        let prev_nonce = self.chain.tip().nonce;
        let difficulty = self.difficulty;
        let mining = tokio::task::spawn_blocking(move || {
            let cancel = AtomicBool::new(false);
            ledger_pow::mine(prev_nonce, difficulty, &cancel)
        })
        .await
        .expect("mining task panicked")
        .expect("mining search is only cancelled via the flag, which is never set here");

        let block = Block::build(
            self.chain.tip(),
            transactions,
            uncles,
            mining.nonce,
            mining.block_time,
            mining.difficulty_used,
        )?;
        self.chain.append(block.clone());
        self.difficulty = ledger_pow::adjust_difficulty(self.difficulty, mining.block_time);

        self.reconcile_mempool()?;
        ledger_sync::broadcast_block(self.peers.peers(), &block).await;

        tracing::info!(index = block.index, difficulty = block.difficulty, "mined block");
        Ok(block)
    }

    /// Validate an incoming block against the current head and, if valid,
    /// append it and reconcile the mempool.
    pub fn receive_block(&mut self, block: Block) -> Result<(), EngineError> {
        let pair = [self.chain.tip().clone(), block.clone()];
        if !ledger_chain::is_chain_valid(&pair) {
            return Err(EngineError::InvalidBlock);
        }
        self.chain.append(block);
        self.reconcile_mempool()?;
        Ok(())
    }

    /// Pull-based consensus: adopt the longest valid peer chain, with no
    /// uncle fallback. Returns `true` if the local chain was replaced.
    pub async fn replace_chain(&mut self) -> Result<bool, EngineError> {
        let replaced = ledger_sync::replace_chain(&mut self.chain, self.peers.peers()).await;
        if replaced {
            self.reconcile_mempool()?;
        }
        Ok(replaced)
    }

    /// Pull-based consensus: adopt the longest valid peer chain, or fall
    /// back to scanning for uncle candidates within the window.
    pub async fn apply_consensus(&mut self) -> Result<ConsensusOutcome, EngineError> {
        let outcome = ledger_sync::apply_consensus(&mut self.chain, self.peers.peers(), &mut self.uncles).await;
        if outcome == ConsensusOutcome::Adopted {
            self.reconcile_mempool()?;
        }
        Ok(outcome)
    }

    /// Server-side convenience: sign `{sender, receiver, amount, nonce}`
    /// with `private_key_pem` and return the lowercase hex signature. Pure
    /// and stateless — does not touch engine state.
    pub fn sign_transaction(
        sender: &str,
        receiver: &str,
        amount: u64,
        nonce: u64,
        private_key_pem: &str,
    ) -> Result<String, EngineError> {
        let unsigned = Transaction::new(sender, receiver, amount, nonce, "", "");
        let signing_bytes = unsigned.canonical_signing_bytes()?;
        Ok(ledger_crypto::sign(private_key_pem, &signing_bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair() -> ledger_crypto::KeyPair {
        ledger_crypto::generate_keypair().unwrap()
    }

    #[tokio::test]
    async fn genesis_chain_is_valid() {
        let engine = Engine::new(PeerRegistry::new());
        assert_eq!(engine.chain().len(), 1);
        assert!(engine.is_valid());
    }

    #[tokio::test]
    async fn admit_then_mine_includes_transaction() {
        let mut engine = Engine::new(PeerRegistry::new());
        let keys = keypair();
        let signature =
            Engine::sign_transaction(&keys.public_key_pem, "bob", 10, 1, &keys.private_key_pem).unwrap();

        let expected_index = engine
            .admit_transaction(
                keys.public_key_pem.clone(),
                "bob".into(),
                10,
                1,
                signature,
                keys.public_key_pem.clone(),
            )
            .await
            .unwrap();
        assert_eq!(expected_index, 2);

        let block = engine.mine_block().await.unwrap();
        assert_eq!(block.index, 2);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(engine.chain().len(), 2);
        assert!(engine.is_valid());
    }

    #[tokio::test]
    async fn stale_nonce_is_rejected() {
        let mut engine = Engine::new(PeerRegistry::new());
        let keys = keypair();
        let signature =
            Engine::sign_transaction(&keys.public_key_pem, "bob", 10, 1, &keys.private_key_pem).unwrap();

        engine
            .admit_transaction(
                keys.public_key_pem.clone(),
                "bob".into(),
                10,
                1,
                signature.clone(),
                keys.public_key_pem.clone(),
            )
            .await
            .unwrap();

        let err = engine
            .admit_transaction(keys.public_key_pem.clone(), "bob".into(), 10, 1, signature, keys.public_key_pem)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Admission(_)));
    }

    #[tokio::test]
    async fn receive_block_rejects_wrong_previous_hash() {
        let mut engine = Engine::new(PeerRegistry::new());
        let mut bad_block = ledger_chain::Block::build(engine.chain().tip(), Vec::new(), Vec::new(), 0, 0.1, 1).unwrap();
        bad_block.previous_hash = "deadbeef".into();

        let err = engine.receive_block(bad_block).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBlock));
        assert_eq!(engine.chain().len(), 1);
    }
}
