//! Peer registry, gossip broadcast and longest-valid-chain consensus pull.

pub mod client;
pub mod consensus;
pub mod registry;
pub mod wire;

pub use client::{broadcast_block, broadcast_transaction, fetch_chain};
pub use consensus::{apply_consensus, replace_chain, ConsensusOutcome};
pub use registry::PeerRegistry;
pub use wire::ChainResponse;
