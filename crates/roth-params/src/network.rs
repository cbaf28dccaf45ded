//! roth network definitions

use serde::{Deserialize, Serialize};

/// Network type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    /// Production network
    Livenet,
    /// Test network
    Testnet,
}

impl NetworkType {
    /// Parse from the string form used in persisted records
    pub fn from_name(name: &str) -> crate::Result<Self> {
        match name {
            "livenet" => Ok(NetworkType::Livenet),
            "testnet" => Ok(NetworkType::Testnet),
            other => Err(crate::Error::InvalidNetwork(other.to_string())),
        }
    }
}

/// Network configuration
#[derive(Debug, Clone)]
pub struct Network {
    /// Network type
    pub network_type: NetworkType,
    /// Human-readable name
    pub name: &'static str,
    /// Base URL of the pairing/account API
    pub api_url: &'static str,
    /// Invoice host accepted for deep-linked invoice URLs
    pub invoice_host: &'static str,
}

impl Network {
    /// Get livenet parameters
    pub const fn livenet() -> Self {
        Self {
            network_type: NetworkType::Livenet,
            name: "livenet",
            api_url: "https://roth.com",
            invoice_host: "roth.com",
        }
    }

    /// Get testnet parameters
    pub const fn testnet() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            name: "testnet",
            api_url: "https://test.roth.com",
            invoice_host: "test.roth.com",
        }
    }

    /// Get network by type
    pub const fn from_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Livenet => Self::livenet(),
            NetworkType::Testnet => Self::testnet(),
        }
    }

    /// JSON-RPC style API root, token optionally appended per call
    pub fn api_root(&self) -> String {
        format!("{}/api/v2/", self.api_url)
    }
}
