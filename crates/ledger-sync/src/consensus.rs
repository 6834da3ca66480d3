use ledger_chain::{Chain, UnclePool};

use crate::client;

/// Result of an `apply_consensus` pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusOutcome {
    /// A strictly longer, valid peer chain was adopted.
    Adopted,
    /// No peer offered a longer valid chain, but `count` uncle candidates
    /// were discovered within the eligibility window.
    UnclesDiscovered(usize),
    /// Nothing changed.
    NoChange,
}

/// Pull-based longest-valid-chain consensus, with no uncle fallback.
///
/// Fetches every peer's chain. Among peers reporting a length greater than
/// the local chain and whose chain validates, adopts the longest; ties are
/// broken by `peers`' first-seen order (the first peer reaching the max
/// length wins, since later equal-length candidates never overtake it).
/// Returns `true` if the local chain was replaced.
pub async fn replace_chain(local: &mut Chain, peers: &[String]) -> bool {
    let local_length = local.len();
    let mut best: Option<Chain> = None;

    for peer in peers {
        let Some(response) = client::fetch_chain(peer).await else {
            continue;
        };
        if response.length <= local_length {
            continue;
        }

        let candidate = Chain::from_blocks(response.chain);
        if candidate.len() != response.length || !candidate.is_valid() {
            continue;
        }

        let candidate_is_better = match &best {
            Some(current_best) => candidate.len() > current_best.len(),
            None => true,
        };
        if candidate_is_better {
            best = Some(candidate);
        }
    }

    match best {
        Some(candidate) => {
            *local = candidate;
            true
        }
        None => false,
    }
}

/// Pull-based longest-valid-chain consensus with uncle backfill, per the
/// gossip and consensus component.
///
/// Runs [`replace_chain`] first; if no peer offered a longer chain, peers
/// are scanned again for blocks within the uncle window absent from the
/// local chain.
pub async fn apply_consensus(
    local: &mut Chain,
    peers: &[String],
    uncle_pool: &mut UnclePool,
) -> ConsensusOutcome {
    if replace_chain(local, peers).await {
        return ConsensusOutcome::Adopted;
    }

    let head_index = local.tip().index;
    let mut discovered = 0usize;

    for peer in peers {
        let Some(response) = client::fetch_chain(peer).await else {
            continue;
        };

        for block in response.chain {
            let in_window = head_index >= 7
                && head_index - 7 <= block.index
                && block.index < head_index;
            if !in_window {
                continue;
            }

            let already_on_chain = local
                .get(block.index)
                .map(|local_block| local_block.hash().ok() == block.hash().ok())
                .unwrap_or(false);
            if already_on_chain {
                continue;
            }

            uncle_pool.insert(block);
            discovered += 1;
        }
    }

    if discovered > 0 {
        ConsensusOutcome::UnclesDiscovered(discovered)
    } else {
        ConsensusOutcome::NoChange
    }
}
