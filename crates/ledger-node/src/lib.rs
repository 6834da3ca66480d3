pub mod config;
pub mod engine;
pub mod error;

pub use config::{load_peers, NodeConfig};
pub use engine::Engine;
pub use error::{ConfigError, EngineError};
