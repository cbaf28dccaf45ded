//! Error types for account/identity operations

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Account and identity errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Identity generation or loading failed
    #[error("Identity error: {0}")]
    Identity(String),

    /// Signing or verification failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Network transport failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server returned an application-level error
    #[error("API error: {0}")]
    Api(String),

    /// Payment-protocol resolution failed
    #[error("Protocol resolution error: {0}")]
    Protocol(String),

    /// Pairing failed
    #[error("Pairing error: {0}")]
    Pairing(String),

    /// Operation not valid in the current pairing state
    #[error("Invalid state: {0}")]
    State(String),

    /// Persistent store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON encoding/decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<secp256k1::Error> for Error {
    fn from(err: secp256k1::Error) -> Self {
        Error::Signing(err.to_string())
    }
}
