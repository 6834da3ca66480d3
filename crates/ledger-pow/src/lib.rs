//! Proof-of-work puzzle and adaptive difficulty controller.
//!
//! The puzzle: given the previous block's nonce `p`, find the smallest
//! non-negative `n` such that `int(H(utf8(str(p) || str(n))), 16) < 2^(256 - D)`,
//! where `H` is double-SHA-256 and `D` is the current difficulty. Decimal
//! representations of `p` and `n` come from `u64::to_string`, which never
//! emits leading zeros and is always the shortest representation of the
//! value — the concatenation is unambiguous by construction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use num_bigint::BigUint;

/// Node-local target block time, in seconds. Difficulty adjustment nudges
/// toward this value; it is not consensus-enforced.
pub const TARGET_BLOCK_SECONDS: f64 = 2.0;

/// Outcome of a successful mining search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningResult {
    /// The nonce found.
    pub nonce: u64,
    /// Wall time spent searching, in seconds.
    pub block_time: f64,
    /// The difficulty that governed this search (snapshotted before the
    /// post-mining adjustment).
    pub difficulty_used: u32,
}

/// Returns `true` if `int(H(utf8(str(prev_nonce) || str(candidate))), 16) < 2^(256 - difficulty)`.
///
/// A digest is 256 bits wide, so `difficulty >= 256` would leave nothing for
/// the threshold shift to work with; such a difficulty can never be
/// satisfied and is rejected outright rather than underflowing `256 -
/// difficulty`. This matters beyond local mining: `is_chain_valid` runs this
/// check over every block of a peer-supplied chain during consensus, so
/// `difficulty` here is adversarial input, not just a locally-adjusted value.
pub fn satisfies_difficulty(prev_nonce: u64, candidate: u64, difficulty: u32) -> bool {
    if difficulty >= 256 {
        return false;
    }
    let preimage = format!("{prev_nonce}{candidate}");
    let digest_hex = ledger_hash::double_sha256_hex(preimage.as_bytes());
    let digest_int = BigUint::parse_bytes(digest_hex.as_bytes(), 16)
        .expect("hex digest is always valid base-16");
    let threshold = BigUint::from(1u8) << (256u32 - difficulty);
    digest_int < threshold
}

/// Search for the smallest `n` satisfying the puzzle at `difficulty`,
/// starting from `prev_nonce`. Checks `cancel` between iterations and
/// returns `None` if it flips to `true` before a solution is found.
pub fn mine(prev_nonce: u64, difficulty: u32, cancel: &AtomicBool) -> Option<MiningResult> {
    let started = Instant::now();
    let mut candidate: u64 = 0;

    loop {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }
        if satisfies_difficulty(prev_nonce, candidate, difficulty) {
            return Some(MiningResult {
                nonce: candidate,
                block_time: started.elapsed().as_secs_f64(),
                difficulty_used: difficulty,
            });
        }
        candidate += 1;
    }
}

/// Apply the post-mining difficulty adjustment rule: raise difficulty when
/// mining ran comfortably under target, lower it when it ran comfortably
/// over target (never below 1).
pub fn adjust_difficulty(current: u32, block_time: f64) -> u32 {
    if block_time < TARGET_BLOCK_SECONDS * 0.8 {
        current + 1
    } else if block_time > TARGET_BLOCK_SECONDS * 1.2 && current > 1 {
        current - 1
    } else {
        current
    }
    .max(1)
}
