use std::collections::HashMap;

use ledger_merkle::MerkleTree;

use crate::block::Block;

/// Validate a chain's non-genesis blocks: link hashes, the PoW inequality,
/// recomputed Merkle roots, per-transaction signatures and cross-chain
/// per-sender nonce monotonicity.
///
/// Signatures are always checked against a transaction's own `public_key`
/// field, never against `sender` — `sender` is an opaque identity string
/// and may legitimately differ from the signing key's PEM representation.
///
/// The genesis block is the anchor and is not itself validated.
pub fn is_chain_valid(blocks: &[Block]) -> bool {
    let mut nonce_table: HashMap<&str, u64> = HashMap::new();

    for i in 1..blocks.len() {
        let previous = &blocks[i - 1];
        let current = &blocks[i];

        let previous_hash = match previous.hash() {
            Ok(h) => h,
            Err(_) => return false,
        };
        if current.previous_hash != previous_hash {
            return false;
        }

        if !ledger_pow::satisfies_difficulty(previous.nonce, current.nonce, current.difficulty) {
            return false;
        }

        let tree = match MerkleTree::new(&current.transactions) {
            Ok(t) => t,
            Err(_) => return false,
        };
        if tree.root_hash() != current.merkleroot {
            return false;
        }

        for tx in &current.transactions {
            let signing_bytes = match tx.canonical_signing_bytes() {
                Ok(b) => b,
                Err(_) => return false,
            };
            if ledger_crypto::verify(&tx.public_key, &signing_bytes, &tx.signature).is_err() {
                return false;
            }

            match nonce_table.get(tx.sender.as_str()) {
                Some(&last) if tx.nonce <= last => return false,
                _ => {
                    nonce_table.insert(&tx.sender, tx.nonce);
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use ledger_transaction::Transaction;

    use super::*;
    use crate::block::Block as ChainBlock;

    fn signed_tx(nonce: u64) -> Transaction {
        let keys = ledger_crypto::generate_keypair().unwrap();
        let unsigned = Transaction::new(&keys.public_key_pem, "bob", 10, nonce, "", "");
        let signing_bytes = unsigned.canonical_signing_bytes().unwrap();
        let signature = ledger_crypto::sign(&keys.private_key_pem, &signing_bytes).unwrap();
        Transaction::new(&keys.public_key_pem, "bob", 10, nonce, signature, &keys.public_key_pem)
    }

    #[test]
    fn single_block_chain_is_valid() {
        let genesis = ChainBlock::genesis();
        let block = ChainBlock::build(&genesis, vec![signed_tx(1)], Vec::new(), 0, 0.1, 1).unwrap();
        assert!(is_chain_valid(&[genesis, block]));
    }

    #[test]
    fn tampered_previous_hash_is_rejected() {
        let genesis = ChainBlock::genesis();
        let mut block = ChainBlock::build(&genesis, Vec::new(), Vec::new(), 0, 0.1, 1).unwrap();
        block.previous_hash = "deadbeef".to_string();
        assert!(!is_chain_valid(&[genesis, block]));
    }

    #[test]
    fn bad_signature_is_rejected() {
        let genesis = ChainBlock::genesis();
        let mut tx = signed_tx(1);
        tx.amount = 9999;
        let block = ChainBlock::build(&genesis, vec![tx], Vec::new(), 0, 0.1, 1).unwrap();
        assert!(!is_chain_valid(&[genesis, block]));
    }

    #[test]
    fn block_with_out_of_range_difficulty_is_rejected_not_panicking() {
        let genesis = ChainBlock::genesis();
        let block = ChainBlock::build(&genesis, Vec::new(), Vec::new(), 0, 0.1, 300).unwrap();
        assert!(!is_chain_valid(&[genesis, block]));
    }

    #[test]
    fn non_increasing_nonce_across_chain_is_rejected() {
        let keys = ledger_crypto::generate_keypair().unwrap();
        let mk_tx = |nonce: u64| {
            let unsigned = Transaction::new(&keys.public_key_pem, "bob", 10, nonce, "", "");
            let signing_bytes = unsigned.canonical_signing_bytes().unwrap();
            let signature = ledger_crypto::sign(&keys.private_key_pem, &signing_bytes).unwrap();
            Transaction::new(&keys.public_key_pem, "bob", 10, nonce, signature, &keys.public_key_pem)
        };

        let genesis = ChainBlock::genesis();
        let block1 = ChainBlock::build(&genesis, vec![mk_tx(5)], Vec::new(), 0, 0.1, 1).unwrap();
        let block2 = ChainBlock::build(&block1, vec![mk_tx(5)], Vec::new(), 0, 0.1, 1).unwrap();
        assert!(!is_chain_valid(&[genesis, block1, block2]));
    }
}
