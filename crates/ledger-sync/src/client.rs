use std::time::Duration;

use futures::future::join_all;

use ledger_chain::Block;
use ledger_transaction::Transaction;

use crate::wire::ChainResponse;

/// Per-peer request timeout for gossip and consensus pulls. The reference
/// node uses timeouts in the 5-25s range depending on endpoint; broadcast
/// traffic is small and latency-sensitive, so it gets the short end.
pub const BROADCAST_TIMEOUT: Duration = Duration::from_secs(5);
/// Consensus pulls transfer whole chains and tolerate slower peers.
pub const CONSENSUS_TIMEOUT: Duration = Duration::from_secs(25);

fn client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("reqwest client configuration is always valid")
}

/// Push a transaction to every peer, best-effort. A failing peer is logged
/// and does not affect the others or roll back local state.
pub async fn broadcast_transaction(peers: &[String], tx: &Transaction) {
    let http = client(BROADCAST_TIMEOUT);
    let sends = peers.iter().map(|peer| {
        let http = http.clone();
        let url = format!("{peer}/receive_transaction");
        async move {
            if let Err(err) = http.post(&url).json(tx).send().await {
                tracing::warn!(%peer, error = %err, "failed to push transaction");
            }
        }
    });
    join_all(sends).await;
}

/// Push a mined block to every peer, best-effort.
pub async fn broadcast_block(peers: &[String], block: &Block) {
    let http = client(BROADCAST_TIMEOUT);
    let sends = peers.iter().map(|peer| {
        let http = http.clone();
        let url = format!("{peer}/receive_block");
        async move {
            if let Err(err) = http.post(&url).json(block).send().await {
                tracing::warn!(%peer, error = %err, "failed to push block");
            }
        }
    });
    join_all(sends).await;
}

/// Fetch a peer's chain and length. Returns `None` on any network or
/// decode error — callers treat an unreachable peer as simply absent from
/// the candidate set.
pub async fn fetch_chain(peer: &str) -> Option<ChainResponse> {
    let http = client(CONSENSUS_TIMEOUT);
    let url = format!("{peer}/get_chain");
    match http.get(&url).send().await {
        Ok(response) => match response.json::<ChainResponse>().await {
            Ok(body) => Some(body),
            Err(err) => {
                tracing::warn!(%peer, error = %err, "malformed chain response");
                None
            }
        },
        Err(err) => {
            tracing::warn!(%peer, error = %err, "failed to fetch chain");
            None
        }
    }
}
