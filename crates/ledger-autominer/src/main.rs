//! Auto-mining driver: polls a node's `/mine_block` endpoint on a fixed
//! interval, backing off exponentially while the node is unreachable or
//! erroring, and resetting the backoff on the first success after one.

use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Polls a ledger node and triggers mining on an interval.
#[derive(Parser, Debug)]
#[command(name = "ledger-autominer", version, about = "Auto-mining driver for a ledger node")]
struct Cli {
    /// Base URL of the node to mine against, e.g. http://localhost:5000.
    node: String,

    /// Seconds to wait between mining attempts while healthy.
    #[arg(long, default_value_t = 2)]
    interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ledger_autominer=info".parse()?))
        .init();

    let cli = Cli::parse();
    let interval = Duration::from_secs(cli.interval_secs.max(1));
    let client = reqwest::Client::new();
    let mine_url = format!("{}/mine_block", cli.node.trim_end_matches('/'));

    let mut backoff = interval;
    loop {
        match client.get(&mine_url).send().await {
            Ok(response) if response.status().is_success() => {
                info!(node = %cli.node, "mined a block");
                backoff = interval;
                tokio::time::sleep(interval).await;
            }
            Ok(response) => {
                warn!(node = %cli.node, status = %response.status(), "mine_block returned an error status");
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
            Err(err) => {
                warn!(node = %cli.node, error = %err, "failed to reach node");
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }
    }
}
