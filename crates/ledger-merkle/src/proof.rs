use serde::{Deserialize, Serialize};

/// Indicates which side the sibling hash sits on when re-computing a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofSide {
    Left,
    Right,
}

/// A single step in a Merkle inclusion proof: the sibling's hex hash and
/// which side it sits on relative to the value being folded upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    pub hash: String,
    pub side: ProofSide,
}

/// An inclusion proof for a single transaction leaf.
///
/// Verification folds the leaf hash upward through each step —
/// `SHA256(left_hex || right_hex)` at every level, hex strings concatenated
/// before hashing, matching the tree's own internal-node rule — until the
/// result is compared against the expected root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The hex hash of the leaf being proved.
    pub leaf_hash: String,
    /// Ordered list of sibling steps from leaf to root.
    pub path: Vec<ProofNode>,
}

impl MerkleProof {
    /// Returns `true` if following the proof path reproduces `expected_root`.
    pub fn verify(&self, expected_root: &str) -> bool {
        let mut current = self.leaf_hash.clone();

        for node in &self.path {
            let combined = match node.side {
                ProofSide::Left => format!("{}{}", node.hash, current),
                ProofSide::Right => format!("{}{}", current, node.hash),
            };
            current = ledger_hash::sha256_hex(combined.as_bytes());
        }

        current == expected_root
    }
}
