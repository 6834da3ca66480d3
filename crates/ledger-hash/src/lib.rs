//! Canonical JSON encoding and the double-SHA-256 primitive (`H`) that every
//! hash-linked structure in the ledger routes through.
//!
//! Block hashes, transaction signing bytes, Merkle leaves and mempool dedup
//! keys must all canonicalize the same way or nodes built independently will
//! disagree about what a given object hashes to.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Serialize `value` to canonical JSON: object keys sorted lexicographically,
/// recursively, with no insignificant whitespace.
///
/// `serde_json::to_value` already turns Rust maps into `serde_json::Map`,
/// which preserves insertion order; this walks the resulting tree and
/// re-inserts entries in sorted order before the final `to_string`.
pub fn to_canonical_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let raw = serde_json::to_value(value)?;
    let sorted = sort_value(raw);
    serde_json::to_string(&sorted)
}

fn sort_value(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match value {
        Value::Object(map) => {
            let mut sorted = serde_json::Map::new();
            let mut keys: Vec<String> = map.keys().cloned().collect();
            keys.sort();
            for key in keys {
                let v = map[&key].clone();
                sorted.insert(key, sort_value(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_value).collect()),
        other => other,
    }
}

/// Single SHA-256 digest of `bytes`, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// `H(bytes) = SHA256(SHA256(bytes))`, lowercase hex.
///
/// This is the primitive used for block hashes and chain linkage. Merkle
/// leaves and internal nodes use a single [`sha256_hex`] instead (see
/// `ledger-merkle`).
pub fn double_sha256_hex(bytes: &[u8]) -> String {
    let first = Sha256::digest(bytes);
    let second = Sha256::digest(first);
    hex::encode(second)
}

/// Canonicalize `value` and hash it with [`double_sha256_hex`].
pub fn hash_canonical<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let json = to_canonical_json(value)?;
    Ok(double_sha256_hex(json.as_bytes()))
}
