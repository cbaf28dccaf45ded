//! Classified intent types
//!
//! Every incoming string resolves to exactly one `ClassifiedIntent`
//! variant, carrying the minimal payload needed to act on it. Strongly
//! typed payloads replace the original's duck-typed menu/config objects.

use roth_params::Coin;

/// Payload extracted from a send-capable payment URI
#[derive(Debug, Clone, PartialEq)]
pub struct SendPayload {
    /// Target coin
    pub coin: Coin,
    /// Recipient address (native display format for the coin)
    pub address: String,
    /// Amount in the coin's minor unit, when the URI carried one
    pub amount: Option<u128>,
    /// Free-form message/memo
    pub message: Option<String>,
    /// Required fee override (gas price for Ethereum)
    pub required_fee: Option<f64>,
    /// Destination tag for tagged ledgers
    pub destination_tag: Option<String>,
    /// Payment-protocol redirect pointer; supersedes direct send
    pub paypro: Option<String>,
}

impl SendPayload {
    /// Bare-address payload with no URI parameters
    pub fn address_only(coin: Coin, address: impl Into<String>) -> Self {
        Self {
            coin,
            address: address.into(),
            amount: None,
            message: None,
            required_fee: None,
            destination_tag: None,
            paypro: None,
        }
    }
}

/// Parameters of a Simplex purchase redirect
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimplexParams {
    /// Whether the purchase succeeded
    pub success: Option<String>,
    /// Simplex payment id
    pub payment_id: Option<String>,
    /// Quote id
    pub quote_id: Option<String>,
    /// User id
    pub user_id: Option<String>,
}

/// Parameters of a Wyre order redirect
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WyreOrder {
    /// Transfer id
    pub transfer_id: Option<String>,
    /// Destination wallet id
    pub wallet_id: Option<String>,
    /// Order owner
    pub owner: Option<String>,
    /// Order id (mandatory; redirects without one are ignored)
    pub order_id: String,
    /// Account id
    pub account_id: Option<String>,
    /// Destination address
    pub dest: Option<String>,
    /// Destination amount
    pub dest_amount: Option<String>,
    /// Destination currency
    pub dest_currency: Option<String>,
    /// Purchase amount
    pub purchase_amount: Option<String>,
    /// Source amount
    pub source_amount: Option<String>,
    /// Source currency
    pub source_currency: Option<String>,
    /// Order status
    pub status: Option<String>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Payment method name
    pub payment_method_name: Option<String>,
    /// On-chain transaction id
    pub blockchain_network_tx: Option<String>,
}

/// Pairing request carried by a `wallet-card/pairing` path
#[derive(Debug, Clone, PartialEq)]
pub struct CardPairing {
    /// One-time pairing secret
    pub secret: String,
    /// Optional verification code
    pub code: Option<String>,
    /// Redirect back to the dashboard after pairing
    pub dashboard_redirect: bool,
    /// Set when pairing right after completing an order
    pub order_complete: bool,
}

/// Secondary events carried on the reserved `wallet-card/` path
#[derive(Debug, Clone, PartialEq)]
pub enum WalletCardEvent {
    /// Pair the embedded card surface with the account API
    Pairing(CardPairing),
    /// Enable the card experiment
    OrderNow,
    /// Email verification completed
    EmailVerified,
    /// Start the card order flow
    GetStarted,
    /// Retry the last card action
    Retry,
    /// Debit card order placed
    DebitCardOrder,
    /// Unknown event name; acknowledged but not acted on
    Unknown(String),
}

/// The classified meaning of an arbitrary input string.
///
/// Classification is total: every input maps to exactly one variant, with
/// `Unrecognized` as the terminal fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedIntent {
    /// Deep-linked invoice URL on the roth invoice host
    InvoiceUrl {
        /// Full invoice URL
        url: String,
    },
    /// Input carrying an invoice-unlock marker
    InvoiceUnlock {
        /// The raw input, fed to the unlock flow
        raw: String,
    },
    /// BIP72-style payment-protocol URI (`<scheme>?r=...`)
    PayPro {
        /// Decoded payment-protocol URL
        url: String,
        /// Coin hinted by the URI scheme, when present
        coin: Option<Coin>,
    },
    /// Bitcoin payment URI
    BitcoinUri(SendPayload),
    /// Bitcoin Cash payment URI (address in CashAddr form)
    BitcoinCashUri(SendPayload),
    /// Ethereum payment URI
    EthereumUri(SendPayload),
    /// Ripple payment URI
    RippleUri(SendPayload),
    /// Dogecoin payment URI
    DogecoinUri(SendPayload),
    /// WalletConnect session URI
    WalletConnectUri {
        /// The full `wc:` URI
        uri: String,
    },
    /// Generic web URL (never an invoice URL; those rank higher)
    PlainUrl {
        /// The URL
        url: String,
    },
    /// Bare chain address with no URI wrapper
    PlainAddress {
        /// Coin the address belongs to
        coin: Coin,
        /// The address as scanned
        address: String,
    },
    /// Coinbase OAuth redirect
    CoinbaseRedirect {
        /// OAuth authorization code
        code: Option<String>,
    },
    /// Simplex purchase redirect
    SimplexRedirect(SimplexParams),
    /// Wyre order redirect; `None` for the bare no-op form
    WyreRedirect(Option<WyreOrder>),
    /// Wyre error redirect
    WyreError,
    /// App-link invoice intent (`<scheme>://invoice?url=...`)
    InvoiceIntent {
        /// Embedded invoice URL to re-route
        url: Option<String>,
    },
    /// roth landing-redirect link (`roth://landing/<target>`)
    CardRedirLink {
        /// Redirect target (e.g. `card`)
        target: String,
    },
    /// roth card URI; superseded pairing path, acknowledged only
    CardUri {
        /// Raw URI
        raw: String,
    },
    /// roth payment URI with an explicit `coin` parameter
    RothUri(SendPayload),
    /// Wallet join/invitation code
    JoinCode {
        /// The code, exactly as scanned (prefix preserved)
        code: String,
    },
    /// Raw private key (WIF or BIP38-encrypted)
    PrivateKey {
        /// The key material
        key: String,
    },
    /// Exported "import words" payload (`1|`/`2|`/`3|` prefix)
    ImportPrivateKey {
        /// The export payload
        code: String,
    },
    /// Reserved `wallet-card/<event>` path
    WalletCard(WalletCardEvent),
    /// Dynamic-link marker
    DynamicLink {
        /// Extracted `deep_link_id` parameter
        deep_link: Option<String>,
    },
    /// No predicate matched; terminal, not an error
    Unrecognized {
        /// The raw input
        raw: String,
    },
}

impl ClassifiedIntent {
    /// Short name of the variant, used in logs and scan previews
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedIntent::InvoiceUrl { .. } => "InvoiceUri",
            ClassifiedIntent::InvoiceUnlock { .. } => "InvoiceUnlock",
            ClassifiedIntent::PayPro { .. } => "PayPro",
            ClassifiedIntent::BitcoinUri(_) => "BitcoinUri",
            ClassifiedIntent::BitcoinCashUri(_) => "BitcoinCashUri",
            ClassifiedIntent::EthereumUri(_) => "EthereumUri",
            ClassifiedIntent::RippleUri(_) => "RippleUri",
            ClassifiedIntent::DogecoinUri(_) => "DogecoinUri",
            ClassifiedIntent::WalletConnectUri { .. } => "WalletConnectUri",
            ClassifiedIntent::PlainUrl { .. } => "PlainUrl",
            ClassifiedIntent::PlainAddress { .. } => "PlainAddress",
            ClassifiedIntent::CoinbaseRedirect { .. } => "Coinbase",
            ClassifiedIntent::SimplexRedirect(_) => "Simplex",
            ClassifiedIntent::WyreRedirect(_) => "Wyre",
            ClassifiedIntent::WyreError => "WyreError",
            ClassifiedIntent::InvoiceIntent { .. } => "InvoiceIntent",
            ClassifiedIntent::CardRedirLink { .. } => "CardRedirLink",
            ClassifiedIntent::CardUri { .. } => "CardUri",
            ClassifiedIntent::RothUri(_) => "RothUri",
            ClassifiedIntent::JoinCode { .. } => "JoinWallet",
            ClassifiedIntent::PrivateKey { .. } => "PrivateKey",
            ClassifiedIntent::ImportPrivateKey { .. } => "ImportPrivateKey",
            ClassifiedIntent::WalletCard(_) => "WalletCard",
            ClassifiedIntent::DynamicLink { .. } => "DynamicLink",
            ClassifiedIntent::Unrecognized { .. } => "Unrecognized",
        }
    }
}

/// Lightweight scan-preview descriptor for an input string
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedData {
    /// The raw input
    pub data: String,
    /// Stable type tag
    pub kind: &'static str,
    /// Human-readable title
    pub title: &'static str,
}
