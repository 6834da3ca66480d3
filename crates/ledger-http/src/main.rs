use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ledger_node::Engine;

/// Ledger engine node daemon.
#[derive(Parser, Debug)]
#[command(
    name = "ledger-http",
    version,
    about = "Peer-to-peer replicated ledger node"
)]
struct Cli {
    /// TCP port to listen on.
    #[arg(default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ledger_http=info".parse()?))
        .init();

    let self_addr = format!("localhost:{}", cli.port);
    let (peers, config_result) =
        ledger_node::load_peers(&PathBuf::from("nodes.json"), &self_addr);
    if let Err(err) = config_result {
        info!(error = %err, "starting with empty peer set");
    }

    let state: ledger_http::SharedState = Arc::new(ledger_http::AppState {
        engine: Mutex::new(Engine::new(peers)),
    });

    let app = ledger_http::router(state);

    let addr = format!("0.0.0.0:{}", cli.port);
    info!(port = cli.port, "starting ledger node");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
