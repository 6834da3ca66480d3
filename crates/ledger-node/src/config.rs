use std::path::Path;

use serde::Deserialize;

use ledger_sync::PeerRegistry;

use crate::error::ConfigError;

/// Node-local configuration. Listens on `port` (default 5000, per the
/// reference CLI).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub port: u16,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

#[derive(Debug, Deserialize)]
struct NodesFile {
    nodes: Vec<String>,
}

/// Load peer endpoints from a `nodes.json` file, tolerant of a missing
/// scheme on each entry (handled by [`PeerRegistry::register`]).
///
/// A missing or unparseable file is non-fatal: the node starts with an
/// empty peer set and the error is returned for the caller to log, not to
/// abort startup on.
pub fn load_peers(path: &Path, self_addr: &str) -> (PeerRegistry, Result<(), ConfigError>) {
    let mut registry = PeerRegistry::with_self_addr(self_addr);

    let result = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ConfigMissing(e.to_string()))
        .and_then(|contents| {
            serde_json::from_str::<NodesFile>(&contents)
                .map_err(|e| ConfigError::ConfigMissing(e.to_string()))
        });

    match &result {
        Ok(file) => {
            for node in &file.nodes {
                registry.register(node);
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "starting with empty peer set");
        }
    }

    (registry, result.map(|_| ()))
}
