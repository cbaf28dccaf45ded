//! Error types for the wallet core
//!
//! Classification itself never fails (it resolves to a terminal variant);
//! these errors cover payload parsing and address handling.

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Wallet core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid payment URI
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Invalid amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Amount overflow
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Matched payload failed secondary validation
    #[error("Invalid intent payload: {0}")]
    InvalidPayload(String),

    /// Unknown or missing coin parameter
    #[error("Unknown coin: {0}")]
    UnknownCoin(String),
}

impl From<roth_params::Error> for Error {
    fn from(err: roth_params::Error) -> Self {
        match err {
            roth_params::Error::UnknownCoin(c) => Error::UnknownCoin(c),
            other => Error::InvalidPayload(other.to_string()),
        }
    }
}
