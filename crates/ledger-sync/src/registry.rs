use std::collections::HashSet;

/// Known peer endpoints (`host:port`), in first-seen order.
///
/// Mirrors the mempool's ordered-list-plus-dedup-set shape: consensus
/// tie-breaks on first-seen order, so insertion order is preserved
/// alongside a set for membership checks.
#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    ordered: Vec<String>,
    seen: HashSet<String>,
    self_addr: Option<String>,
}

fn normalize(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", endpoint.trim_end_matches('/'))
    }
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that will never register `self_addr` as a peer of itself.
    pub fn with_self_addr(self_addr: impl Into<String>) -> Self {
        Self {
            self_addr: Some(normalize(&self_addr.into())),
            ..Self::default()
        }
    }

    /// Register a peer endpoint, tolerant of a missing scheme. Returns
    /// `true` if it was newly added.
    pub fn register(&mut self, endpoint: &str) -> bool {
        let normalized = normalize(endpoint);
        if Some(&normalized) == self.self_addr.as_ref() {
            return false;
        }
        if self.seen.insert(normalized.clone()) {
            self.ordered.push(normalized);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Peers in first-seen order.
    pub fn peers(&self) -> &[String] {
        &self.ordered
    }
}
