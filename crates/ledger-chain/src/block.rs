use chrono::Utc;
use serde::{Deserialize, Serialize};

use ledger_merkle::MerkleTree;
use ledger_transaction::Transaction;

use crate::error::ChainError;

/// Upper bound on uncles stapled into a single block.
pub const MAX_UNCLES: usize = 2;

/// A single block in the ledger.
///
/// Hashing is over the whole struct: `hash(block) = H(canonical_json(block))`
/// with `H` double-SHA-256. `uncles` are carried as plain data — their own
/// stored fields are part of this block's canonical JSON, but they are not
/// re-hashed or re-validated specially when hashing their parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// 1-based height; genesis is 1.
    pub index: u64,
    /// Wall-clock timestamp string.
    pub timestamp: String,
    /// Hex hash of the previous block, `"0"` for genesis.
    pub previous_hash: String,
    /// Ordered list of transactions, possibly empty.
    pub transactions: Vec<Transaction>,
    /// Merkle root over `transactions`, empty string if none.
    pub merkleroot: String,
    /// Leading-zero-bit target used at mining time.
    pub difficulty: u32,
    /// Nonce found by proof-of-work search.
    pub nonce: u64,
    /// Real seconds spent mining; 0 for genesis.
    pub block_time: f64,
    /// Uncle blocks stapled in at build time, up to `MAX_UNCLES`.
    pub uncles: Vec<Block>,
}

impl Block {
    /// Double-SHA-256 of this block's canonical JSON.
    pub fn hash(&self) -> Result<String, ChainError> {
        Ok(ledger_hash::hash_canonical(self)?)
    }

    /// The fixed genesis block. Its hash is never checked against a
    /// predecessor.
    pub fn genesis() -> Self {
        Self {
            index: 1,
            timestamp: Utc::now().to_rfc3339(),
            previous_hash: "0".to_string(),
            transactions: Vec::new(),
            merkleroot: String::new(),
            difficulty: 1,
            nonce: 0,
            block_time: 0.0,
            uncles: Vec::new(),
        }
    }

    /// Assemble a non-genesis block from a mempool snapshot, the previous
    /// block, a proof-of-work result and the uncles selected for this
    /// height.
    pub fn build(
        previous: &Block,
        transactions: Vec<Transaction>,
        uncles: Vec<Block>,
        nonce: u64,
        block_time: f64,
        difficulty_used: u32,
    ) -> Result<Self, ChainError> {
        let tree = MerkleTree::new(&transactions)?;
        let previous_hash = previous.hash()?;

        Ok(Self {
            index: previous.index + 1,
            timestamp: Utc::now().to_rfc3339(),
            previous_hash,
            transactions,
            merkleroot: tree.root_hash(),
            difficulty: difficulty_used,
            nonce,
            block_time,
            uncles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_hashes_deterministically_modulo_timestamp() {
        let g = Block::genesis();
        assert!(g.hash().is_ok());
        assert_eq!(g.previous_hash, "0");
        assert_eq!(g.merkleroot, "");
    }

    #[test]
    fn build_computes_merkle_root_over_transactions() {
        let genesis = Block::genesis();
        let tx = Transaction::new("alice-pk", "bob", 10, 1, "sig", "alice-pk");
        let block = Block::build(&genesis, vec![tx.clone()], Vec::new(), 0, 0.1, 1).unwrap();
        assert_eq!(block.index, 2);
        assert_eq!(block.merkleroot, tx.leaf_hash().unwrap());
    }

    #[test]
    fn build_empty_block_has_empty_merkle_root() {
        let genesis = Block::genesis();
        let block = Block::build(&genesis, Vec::new(), Vec::new(), 0, 0.1, 1).unwrap();
        assert_eq!(block.merkleroot, "");
    }
}
