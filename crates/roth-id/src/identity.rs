//! App identity keys
//!
//! Each network gets its own secp256k1 identity keypair. The compressed
//! public key doubles as the identity string sent in `x-identity` headers.

use crate::{signing, Error, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use roth_params::NetworkType;
use secp256k1::rand::thread_rng;
use secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use std::collections::HashMap;
use std::fmt;

static SECP: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// A signing identity: a secp256k1 keypair
#[derive(Clone)]
pub struct Identity {
    secret: SecretKey,
    public: PublicKey,
}

impl Identity {
    /// Generate a fresh random identity
    pub fn generate() -> Self {
        let (secret, public) = SECP.generate_keypair(&mut thread_rng());
        Self { secret, public }
    }

    /// Load an identity from a hex-encoded secret key
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self> {
        let bytes = hex::decode(secret_hex).map_err(|e| Error::Identity(e.to_string()))?;
        let secret = SecretKey::from_slice(&bytes)?;
        let public = PublicKey::from_secret_key(&SECP, &secret);
        Ok(Self { secret, public })
    }

    /// Compressed public key as hex, the identity string
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public.serialize())
    }

    /// Secret key as hex, for persistence
    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret.secret_bytes())
    }

    /// Sign a canonical string with this identity
    pub fn sign(&self, data: &str) -> Result<String> {
        signing::sign(data, &self.secret)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("public", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

/// Source of per-network app identities
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Get (creating if necessary) the identity for a network
    async fn identity(&self, network: NetworkType) -> Result<Identity>;
}

/// In-memory identity provider. Keys are generated on first use and kept
/// for the life of the process; persistence is the embedder's concern.
#[derive(Default)]
pub struct EphemeralIdentityProvider {
    keys: Mutex<HashMap<NetworkType, Identity>>,
}

impl EphemeralIdentityProvider {
    /// New provider with no keys yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the provider with a known identity, mainly for tests
    pub fn with_identity(network: NetworkType, identity: Identity) -> Self {
        let provider = Self::new();
        provider.keys.lock().insert(network, identity);
        provider
    }
}

#[async_trait]
impl IdentityProvider for EphemeralIdentityProvider {
    async fn identity(&self, network: NetworkType) -> Result<Identity> {
        let mut keys = self.keys.lock();
        Ok(keys
            .entry(network)
            .or_insert_with(Identity::generate)
            .clone())
    }
}
