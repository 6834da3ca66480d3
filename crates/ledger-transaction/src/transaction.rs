use serde::{Deserialize, Serialize};

use crate::TransactionError;

/// The four fields that are actually signed and hashed for replay/ordering
/// purposes. `signature` and `public_key` are carried on [`Transaction`] but
/// deliberately excluded from this tuple — the signature service must never
/// sign or verify over itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    pub nonce: u64,
}

/// A client-submitted, signed transaction as carried in the mempool and in
/// mined blocks.
///
/// `sender` and `public_key` are logically the same RSA public key in PEM
/// form; they are kept as separate fields because the reference validator
/// must always check signatures against `public_key`, never `sender` (see
/// `ledger-chain`'s validator — Open Question #1 in the design notes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    pub nonce: u64,
    /// Lowercase hex-encoded PKCS#1 v1.5 signature.
    pub signature: String,
    /// PEM-encoded RSA public key.
    pub public_key: String,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
        nonce: u64,
        signature: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
            nonce,
            signature: signature.into(),
            public_key: public_key.into(),
        }
    }

    /// The four-field tuple that is actually signed, and that the signature
    /// service verifies against.
    pub fn canonical(&self) -> CanonicalTransaction {
        CanonicalTransaction {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            amount: self.amount,
            nonce: self.nonce,
        }
    }

    /// Canonical JSON bytes of the signable tuple — what gets hashed with
    /// SHA-256 before a PKCS#1 v1.5 signature is produced or checked.
    pub fn canonical_signing_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let json = ledger_hash::to_canonical_json(&self.canonical())?;
        Ok(json.into_bytes())
    }

    /// Normalize `signature` to lowercase hex. Admitted transactions must be
    /// normalized before being inserted into the mempool's dedup set, so a
    /// transaction admitted locally and the same transaction received via
    /// gossip land on the same key regardless of hex case.
    pub fn normalized(mut self) -> Self {
        self.signature = self.signature.to_lowercase();
        self
    }

    /// Canonical JSON of the full augmented transaction (all six fields),
    /// used both as the mempool dedup key and as the Merkle leaf input.
    pub fn canonical_full_json(&self) -> Result<String, TransactionError> {
        Ok(ledger_hash::to_canonical_json(self)?)
    }

    /// Single-SHA-256 leaf hash used by the Merkle tree.
    pub fn leaf_hash(&self) -> Result<String, TransactionError> {
        let json = self.canonical_full_json()?;
        Ok(ledger_hash::sha256_hex(json.as_bytes()))
    }
}
