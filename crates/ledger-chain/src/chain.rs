use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{block::Block, error::ChainError, validator};

/// The append-only sequence of blocks, genesis at index 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::genesis()],
        }
    }

    /// Build a chain from an externally supplied block list, without
    /// validating it. Callers that need a trust boundary should run
    /// [`Chain::is_valid`] before relying on the result.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn tip(&self) -> &Block {
        self.blocks.last().expect("chain always has a genesis block")
    }

    pub fn append(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Block at 1-based `index`, if present.
    pub fn get(&self, index: u64) -> Option<&Block> {
        if index == 0 {
            return None;
        }
        self.blocks.get((index - 1) as usize)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Validate every non-genesis block's link hash, PoW inequality,
    /// Merkle root and per-transaction signatures/nonce monotonicity.
    pub fn is_valid(&self) -> bool {
        validator::is_chain_valid(&self.blocks)
    }

    /// Canonical-JSON keys of every transaction confirmed anywhere in the
    /// chain, for mempool reconciliation.
    pub fn confirmed_transaction_keys(&self) -> Result<HashSet<String>, ChainError> {
        let mut keys = HashSet::new();
        for block in &self.blocks {
            for tx in &block.transactions {
                keys.insert(tx.canonical_full_json()?);
            }
        }
        Ok(keys)
    }

    /// Replace this chain with `candidate` if it is longer and valid.
    /// Returns `true` if the replacement happened.
    pub fn adopt_if_longer(&mut self, candidate: Chain) -> bool {
        if candidate.len() > self.len() && candidate.is_valid() {
            *self = candidate;
            true
        } else {
            false
        }
    }
}
