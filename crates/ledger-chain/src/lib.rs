pub mod block;
pub mod chain;
pub mod error;
pub mod uncle;
pub mod validator;

pub use block::{Block, MAX_UNCLES};
pub use chain::Chain;
pub use error::ChainError;
pub use uncle::UnclePool;
pub use validator::is_chain_valid;
