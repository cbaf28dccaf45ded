//! Payment-protocol resolution
//!
//! Resolving a payment-protocol URL picks the transaction currency before
//! anything touches a send screen: a server-preselected option wins, then
//! a single funded wallet wins, and only a genuine tie asks the user.
//! Resolution is side-effect free; it returns data, never navigates.

use crate::{Error, Result};
use async_trait::async_trait;
use roth_params::Coin;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One payable currency offered by a payment-protocol server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOption {
    /// Currency ticker as reported by the server
    pub currency: String,
    /// Network name (`livenet`, `testnet`)
    #[serde(default)]
    pub network: String,
    /// Amount due in the currency's minor unit
    #[serde(default)]
    pub estimated_amount: u64,
    /// Miner fee the server will add
    #[serde(default)]
    pub miner_fee: u64,
    /// Preselected by the server
    #[serde(default)]
    pub selected: bool,
    /// No funded wallet can pay this option
    #[serde(default)]
    pub disabled: bool,
}

/// The option set for one payment-protocol URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayProOptions {
    /// Offered currencies
    #[serde(default)]
    pub payment_options: Vec<PaymentOption>,
    /// Invoice creation time
    #[serde(default)]
    pub time: Option<String>,
    /// Invoice expiry time
    #[serde(default)]
    pub expires: Option<String>,
}

/// A single transaction output demanded by payment instructions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayProOutput {
    /// Output amount in minor units
    #[serde(default)]
    pub amount: u64,
    /// Destination address
    #[serde(default)]
    pub address: Option<String>,
    /// Invoice id rider, present on tagged-ledger payments
    #[serde(default, rename = "invoiceID")]
    pub invoice_id: Option<String>,
}

/// Payment instructions for one currency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayProInstructions {
    /// Destination address, when given directly
    #[serde(default)]
    pub to_address: Option<String>,
    /// Demanded outputs
    #[serde(default)]
    pub outputs: Vec<PayProOutput>,
    /// Required fee rate in the server's native unit
    #[serde(default)]
    pub required_fee_rate: Option<f64>,
    /// Opaque transaction data rider
    #[serde(default)]
    pub data: Option<String>,
}

/// Detailed payment request for one currency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayProDetails {
    /// Invoice memo shown as the payment description
    #[serde(default)]
    pub memo: Option<String>,
    /// Network name
    #[serde(default)]
    pub network: Option<String>,
    /// Required fee rate in the server's native unit
    #[serde(default)]
    pub required_fee_rate: Option<f64>,
    /// Instruction sets; the first one drives the payment
    #[serde(default)]
    pub instructions: Vec<PayProInstructions>,
}

/// Fetches payment-protocol documents
#[async_trait]
pub trait PayProClient: Send + Sync {
    /// Fetch the option set for a payment URL
    async fn options(&self, payment_url: &str) -> Result<PayProOptions>;

    /// Fetch the detailed payment request for one currency
    async fn details(&self, payment_url: &str, coin: Coin) -> Result<PayProDetails>;
}

/// Answers how many wallets could pay a given amount
pub trait WalletLookup: Send + Sync {
    /// Number of wallets for `coin` on `network` holding at least
    /// `min_amount` minor units
    fn funded_wallet_count(&self, coin: Coin, network: &str, min_amount: u64) -> usize;
}

/// Everything a confirm screen needs for a resolved payment
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmParams {
    /// Transaction currency
    pub coin: Coin,
    /// Destination address
    pub to_address: String,
    /// Amount due in minor units
    pub amount: u64,
    /// Payment description (invoice memo)
    pub description: Option<String>,
    /// Network name from the payment request
    pub network: Option<String>,
    /// The payment-protocol URL, needed for the final payment POST
    pub pay_pro_url: String,
    /// Required fee rate, scaled to per-kilobyte units for UTXO coins
    pub required_fee_rate: Option<f64>,
    /// Invoice id rider for tagged-ledger payments
    pub invoice_id: Option<String>,
    /// Miner fee the server adds
    pub miner_fee: u64,
    /// Opaque transaction data rider
    pub data: Option<String>,
}

/// Outcome of resolving a payment-protocol URL
#[derive(Debug, Clone)]
pub enum PayProResolution {
    /// Exactly one viable currency; go straight to confirmation
    Confirm(ConfirmParams),
    /// Several funded currencies; the user picks one. Unfunded options
    /// carry `disabled`, and `funded` maps each viable ticker to its
    /// wallet count.
    SelectCurrency {
        /// Option set with `disabled` flags applied
        options: PayProOptions,
        /// Funded wallet count per lowercase ticker
        funded: BTreeMap<String, usize>,
    },
}

/// Resolves payment-protocol URLs against the user's wallets
pub struct PayProResolver {
    client: Arc<dyn PayProClient>,
    wallets: Arc<dyn WalletLookup>,
}

impl PayProResolver {
    /// New resolver over a protocol client and wallet lookup
    pub fn new(client: Arc<dyn PayProClient>, wallets: Arc<dyn WalletLookup>) -> Self {
        Self { client, wallets }
    }

    /// Resolve a payment-protocol URL with no currency hint
    pub async fn resolve(&self, payment_url: &str) -> Result<PayProResolution> {
        let mut options = self.client.options(payment_url).await?;
        if options.payment_options.is_empty() {
            return Err(Error::Protocol("no payment options offered".to_string()));
        }

        let selected: Vec<Coin> = options
            .payment_options
            .iter()
            .filter(|o| o.selected)
            .filter_map(|o| Coin::from_ticker(&o.currency).ok())
            .collect();
        if selected.len() == 1 {
            debug!(coin = %selected[0], "server preselected transaction currency");
            return self.confirm(payment_url, selected[0], &options).await;
        }

        let mut funded = BTreeMap::new();
        let mut available = Vec::new();
        for option in &mut options.payment_options {
            match Coin::from_ticker(&option.currency) {
                Ok(coin) => {
                    let count = self.wallets.funded_wallet_count(
                        coin,
                        &option.network,
                        option.estimated_amount,
                    );
                    if count == 0 {
                        option.disabled = true;
                    } else {
                        funded.insert(option.currency.to_lowercase(), count);
                        available.push(coin);
                    }
                }
                Err(_) => option.disabled = true,
            }
        }

        if available.len() == 1 {
            debug!(coin = %available[0], "single funded wallet decides currency");
            return self.confirm(payment_url, available[0], &options).await;
        }

        Ok(PayProResolution::SelectCurrency { options, funded })
    }

    /// Resolve a payment-protocol URL for a known currency, as hinted by a
    /// `?r=` payment URI scheme
    pub async fn resolve_for_coin(&self, payment_url: &str, coin: Coin) -> Result<PayProResolution> {
        let options = self.client.options(payment_url).await?;
        self.confirm(payment_url, coin, &options).await
    }

    async fn confirm(
        &self,
        payment_url: &str,
        coin: Coin,
        options: &PayProOptions,
    ) -> Result<PayProResolution> {
        let details = self.client.details(payment_url, coin).await?;
        let option = options
            .payment_options
            .iter()
            .find(|o| o.currency.eq_ignore_ascii_case(coin.ticker()))
            .ok_or_else(|| {
                Error::Protocol(format!("server offers no {} payment option", coin))
            })?;
        let instructions = details
            .instructions
            .first()
            .ok_or_else(|| Error::Protocol("payment request without instructions".to_string()))?;
        let to_address = instructions
            .to_address
            .clone()
            .or_else(|| instructions.outputs.first().and_then(|o| o.address.clone()))
            .ok_or_else(|| Error::Protocol("payment request without destination".to_string()))?;
        let invoice_id = match coin {
            Coin::Xrp => instructions.outputs.first().and_then(|o| o.invoice_id.clone()),
            _ => None,
        };
        // UTXO servers quote per-byte; confirm screens work per kilobyte
        let required_fee_rate = details
            .required_fee_rate
            .or(instructions.required_fee_rate)
            .map(|rate| {
                if coin.is_utxo() {
                    (rate * 1000.0).ceil()
                } else {
                    rate
                }
            });

        Ok(PayProResolution::Confirm(ConfirmParams {
            coin,
            to_address,
            amount: option.estimated_amount,
            description: details.memo.clone(),
            network: details.network.clone(),
            pay_pro_url: payment_url.to_string(),
            required_fee_rate,
            invoice_id,
            miner_fee: option.miner_fee,
            data: instructions.data.clone(),
        }))
    }
}

/// Production payment-protocol client speaking the JSON protocol
pub struct HttpPayProClient {
    client: reqwest::Client,
}

impl HttpPayProClient {
    /// Build a client with a 30 second request timeout
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PayProClient for HttpPayProClient {
    async fn options(&self, payment_url: &str) -> Result<PayProOptions> {
        let response = self
            .client
            .get(payment_url)
            .header("accept", "application/payment-options")
            .header("x-paypro-version", "2")
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| Error::Protocol(e.to_string()))
    }

    async fn details(&self, payment_url: &str, coin: Coin) -> Result<PayProDetails> {
        let chain = coin.ticker().to_uppercase();
        let body = serde_json::json!({ "chain": chain, "currency": chain });
        let response = self
            .client
            .post(payment_url)
            .header("content-type", "application/payment-request")
            .header("x-paypro-version", "2")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let mut details: PayProDetails = response
            .json()
            .await
            .map_err(|e| Error::Protocol(e.to_string()))?;
        if details.required_fee_rate.is_none() {
            details.required_fee_rate = details
                .instructions
                .first()
                .and_then(|i| i.required_fee_rate);
        }
        Ok(details)
    }
}
