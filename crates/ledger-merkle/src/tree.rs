use ledger_transaction::Transaction;

use crate::{
    error::MerkleError,
    proof::{MerkleProof, ProofNode, ProofSide},
};

/// A binary Merkle tree built from a slice of [`Transaction`]s.
///
/// Leaf hashes are the single SHA-256 digests of each transaction's canonical
/// JSON (see [`Transaction::leaf_hash`]). Parent hashes are
/// `SHA256(left_hex || right_hex)` — hex strings concatenated before hashing,
/// not raw bytes. When a level has an odd width the last element is
/// duplicated so every level folds to an even width.
///
/// A tree built from zero transactions carries no levels and its
/// [`root_hash`](Self::root_hash) is the empty string.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// All levels of the tree, `levels[0]` = leaf hashes (possibly odd
    /// width, unpadded), `levels[last]` = single root hash.
    levels: Vec<Vec<String>>,
}

fn hash_pair(left: &str, right: &str) -> String {
    ledger_hash::sha256_hex(format!("{left}{right}").as_bytes())
}

impl MerkleTree {
    /// Build a Merkle tree from `transactions`. An empty slice yields a tree
    /// whose root hash is `""`.
    pub fn new(transactions: &[Transaction]) -> Result<Self, MerkleError> {
        if transactions.is_empty() {
            return Ok(Self { levels: Vec::new() });
        }

        let mut current: Vec<String> = transactions
            .iter()
            .map(|tx| tx.leaf_hash().map_err(|e| MerkleError::HashFailed(e.to_string())))
            .collect::<Result<_, _>>()?;

        let mut levels: Vec<Vec<String>> = vec![current.clone()];

        while current.len() > 1 {
            if current.len() % 2 != 0 {
                let last = current.last().unwrap().clone();
                current.push(last);
            }

            let parent_level: Vec<String> = current
                .chunks(2)
                .map(|chunk| hash_pair(&chunk[0], &chunk[1]))
                .collect();

            levels.push(parent_level.clone());
            current = parent_level;
        }

        Ok(Self { levels })
    }

    /// `true` if this tree was built from zero transactions.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The Merkle root hash, or `""` for a tree built from zero transactions.
    pub fn root_hash(&self) -> String {
        self.levels
            .last()
            .and_then(|l| l.first())
            .cloned()
            .unwrap_or_default()
    }

    /// Build an inclusion proof for the transaction at `leaf_index` in the
    /// same `transactions` slice used to build the tree.
    pub fn proof_for_index(&self, leaf_index: usize) -> Result<MerkleProof, MerkleError> {
        if self.is_empty() {
            return Err(MerkleError::Empty);
        }
        let leaves = &self.levels[0];
        if leaf_index >= leaves.len() {
            return Err(MerkleError::NotFound);
        }

        let leaf_hash = leaves[leaf_index].clone();
        let mut path = Vec::new();
        let mut index = leaf_index;

        for level in &self.levels[..self.levels.len() - 1] {
            let mut padded = level.clone();
            if padded.len() % 2 != 0 {
                let last = padded.last().unwrap().clone();
                padded.push(last);
            }

            let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };
            let sibling_hash = padded[sibling_index].clone();
            let side = if index % 2 == 0 {
                ProofSide::Right
            } else {
                ProofSide::Left
            };

            path.push(ProofNode {
                hash: sibling_hash,
                side,
            });

            index /= 2;
        }

        Ok(MerkleProof { leaf_hash, path })
    }

    /// Build an inclusion proof for `tx`, located by equality within
    /// `transactions` (the same slice used to build the tree).
    pub fn proof_for_transaction(
        &self,
        transactions: &[Transaction],
        tx: &Transaction,
    ) -> Result<MerkleProof, MerkleError> {
        let index = transactions
            .iter()
            .position(|candidate| candidate == tx)
            .ok_or(MerkleError::NotFound)?;
        self.proof_for_index(index)
    }
}

#[cfg(test)]
mod tests {
    use ledger_transaction::Transaction;

    use super::*;

    fn make_tx(nonce: u64, receiver: &str) -> Transaction {
        Transaction::new("alice-pk", receiver, 1, nonce, "sig", "pk")
    }

    #[test]
    fn empty_transactions_root_is_empty_string() {
        let tree = MerkleTree::new(&[]).unwrap();
        assert_eq!(tree.root_hash(), "");
        assert!(tree.is_empty());
    }

    #[test]
    fn single_transaction_root_equals_leaf_hash() {
        let tx = make_tx(1, "bob");
        let tree = MerkleTree::new(&[tx.clone()]).unwrap();
        assert_eq!(tree.root_hash(), tx.leaf_hash().unwrap());
    }

    #[test]
    fn proof_verifies_for_even_count() {
        let txs: Vec<Transaction> = (0..4).map(|i| make_tx(i, "bob")).collect();
        let tree = MerkleTree::new(&txs).unwrap();
        let root = tree.root_hash();

        for (i, tx) in txs.iter().enumerate() {
            let proof = tree.proof_for_index(i).unwrap();
            assert_eq!(proof.leaf_hash, tx.leaf_hash().unwrap());
            assert!(proof.verify(&root), "proof failed for tx {i}");
        }
    }

    #[test]
    fn proof_verifies_for_odd_count() {
        let txs: Vec<Transaction> = (0..5).map(|i| make_tx(i, "bob")).collect();
        let tree = MerkleTree::new(&txs).unwrap();
        let root = tree.root_hash();

        for i in 0..txs.len() {
            let proof = tree.proof_for_index(i).unwrap();
            assert!(proof.verify(&root), "proof failed for tx {i}");
        }
    }

    #[test]
    fn proof_for_transaction_finds_by_equality() {
        let txs: Vec<Transaction> = (0..3).map(|i| make_tx(i, "bob")).collect();
        let tree = MerkleTree::new(&txs).unwrap();
        let root = tree.root_hash();

        let proof = tree.proof_for_transaction(&txs, &txs[2]).unwrap();
        assert!(proof.verify(&root));
    }

    #[test]
    fn tampered_root_fails_verification() {
        let txs: Vec<Transaction> = (0..4).map(|i| make_tx(i, "bob")).collect();
        let tree = MerkleTree::new(&txs).unwrap();
        let proof = tree.proof_for_index(0).unwrap();
        assert!(!proof.verify("0000000000000000000000000000000000000000000000000000000000000000"));
    }
}
