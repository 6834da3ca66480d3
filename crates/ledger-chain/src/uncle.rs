use crate::block::{Block, MAX_UNCLES};

/// Candidate off-chain blocks observed during consensus, awaiting stapling
/// into a future block.
///
/// An uncle at `index` is eligible for stapling into a block being built at
/// height `h` iff `h >= 7` and `h - 7 <= index < h`.
#[derive(Debug, Clone, Default)]
pub struct UnclePool {
    candidates: Vec<Block>,
}

fn is_eligible(head_index: u64, uncle_index: u64) -> bool {
    head_index >= 7 && head_index - 7 <= uncle_index && uncle_index < head_index
}

impl UnclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a candidate uncle if it is not already tracked (by index and
    /// hash).
    pub fn insert(&mut self, block: Block) {
        let already_known = self
            .candidates
            .iter()
            .any(|b| b.index == block.index && b.hash().ok() == block.hash().ok());
        if !already_known {
            self.candidates.push(block);
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Select up to `MAX_UNCLES` eligible candidates for a block being
    /// built at `next_index`, and remove them from the pool.
    pub fn take_eligible(&mut self, next_index: u64) -> Vec<Block> {
        let mut selected = Vec::new();
        let mut remaining = Vec::new();

        for block in std::mem::take(&mut self.candidates) {
            if selected.len() < MAX_UNCLES && is_eligible(next_index, block.index) {
                selected.push(block);
            } else {
                remaining.push(block);
            }
        }

        self.candidates = remaining;
        selected
    }
}
