//! roth wallet network parameters and constants
//!
//! This crate provides network-specific constants, the supported coin
//! registry with minor-unit precision, and API endpoint configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod coin;
pub mod network;

pub use coin::Coin;
pub use network::{Network, NetworkType};

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid network specified
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Unknown coin ticker
    #[error("Unknown coin: {0}")]
    UnknownCoin(String),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
