pub mod chain;
pub mod keys;
pub mod peer;
pub mod transaction;
