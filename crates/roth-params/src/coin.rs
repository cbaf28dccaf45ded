//! Supported coin registry with minor-unit precision

use serde::{Deserialize, Serialize};

/// Coins the wallet can classify and route payments for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    /// Bitcoin
    Btc,
    /// Bitcoin Cash
    Bch,
    /// Ethereum
    Eth,
    /// Ripple (XRP Ledger)
    Xrp,
    /// Dogecoin
    Doge,
}

impl Coin {
    /// All supported coins, in classification precedence order
    pub const ALL: [Coin; 5] = [Coin::Btc, Coin::Bch, Coin::Eth, Coin::Xrp, Coin::Doge];

    /// Lowercase ticker as used in URIs and API payloads
    pub const fn ticker(&self) -> &'static str {
        match self {
            Coin::Btc => "btc",
            Coin::Bch => "bch",
            Coin::Eth => "eth",
            Coin::Xrp => "xrp",
            Coin::Doge => "doge",
        }
    }

    /// Payment URI scheme for this coin
    pub const fn uri_scheme(&self) -> &'static str {
        match self {
            Coin::Btc => "bitcoin",
            Coin::Bch => "bitcoincash",
            Coin::Eth => "ethereum",
            Coin::Xrp => "ripple",
            Coin::Doge => "dogecoin",
        }
    }

    /// Number of decimal places in the coin's display unit
    pub const fn decimals(&self) -> u32 {
        match self {
            Coin::Btc | Coin::Bch | Coin::Doge => 8,
            Coin::Eth => 18,
            Coin::Xrp => 6,
        }
    }

    /// Multiplier from display unit to the minor unit (satoshi-style)
    pub fn unit_to_minor(&self) -> f64 {
        10f64.powi(self.decimals() as i32)
    }

    /// Whether the coin uses a UTXO ledger (fee rates are per-kB)
    pub const fn is_utxo(&self) -> bool {
        matches!(self, Coin::Btc | Coin::Bch | Coin::Doge)
    }

    /// Whether the coin's ledger routes payments with a destination tag
    pub const fn uses_destination_tag(&self) -> bool {
        matches!(self, Coin::Xrp)
    }

    /// Parse a ticker string (case-insensitive)
    pub fn from_ticker(ticker: &str) -> crate::Result<Self> {
        match ticker.to_ascii_lowercase().as_str() {
            "btc" => Ok(Coin::Btc),
            "bch" => Ok(Coin::Bch),
            "eth" => Ok(Coin::Eth),
            "xrp" => Ok(Coin::Xrp),
            "doge" => Ok(Coin::Doge),
            other => Err(crate::Error::UnknownCoin(other.to_string())),
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ticker())
    }
}
