//! Ordered classification of incoming strings
//!
//! The classifier evaluates a fixed, ordered table of predicate/builder
//! pairs and commits to the first predicate that matches. Order carries
//! meaning: several predicates overlap textually (an invoice URL is also a
//! plain `https://` URL, a legacy-prefix Bitcoin Cash URI also parses as a
//! Bitcoin URI), so precedence is kept as a visible data structure rather
//! than implicit code order.

use crate::intent::{ClassifiedIntent, ParsedData, SendPayload, SimplexParams, WyreOrder};
use crate::{chain, uri, wallet_card};
use once_cell::sync::Lazy;
use regex::Regex;
use roth_params::Coin;
use tracing::{debug, warn};

static INVOICE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://(www\.)?(test\.|staging\.)?roth\.com/i/\w+").unwrap());
static PAYPRO_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(bitcoin|bitcoincash|bchtest|ethereum|ripple|dogecoin)?:\?r=[\w+]").unwrap()
});
static WALLET_CONNECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(wc)?:").unwrap());
static PLAIN_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").unwrap());
static JOIN_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^roth:[0-9A-HJ-NP-Za-km-z]{70,80}$").unwrap());
static JOIN_LEGACY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-HJ-NP-Za-km-z]{70,80}$").unwrap());
static BCH_LEGACY_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(bitcoincash:|bchtest:)").unwrap());

/// Classifier configuration. The app-link scheme is the installed app's
/// name; the card and dynamic-link prefixes are fixed product URLs.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Scheme used by app-specific redirect URIs (`<scheme>://coinbase`...)
    pub app_scheme: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            app_scheme: "roth".to_string(),
        }
    }
}

/// Incoming-data classifier
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

/// One entry of the ordered classification table
pub struct Rule {
    /// Rule name, used in logs and precedence tests
    pub name: &'static str,
    matches: fn(&Classifier, &str) -> bool,
    build: fn(&Classifier, &str) -> ClassifiedIntent,
}

impl Classifier {
    /// Create a classifier with the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// The fixed precedence table, highest priority first
    pub fn rules() -> &'static [Rule] {
        RULES
    }

    /// Classify an input string. Total and deterministic: every input
    /// yields exactly one variant, `Unrecognized` as the fallback.
    pub fn classify(&self, data: &str) -> ClassifiedIntent {
        for rule in RULES {
            if (rule.matches)(self, data) {
                debug!(rule = rule.name, "incoming data classified");
                return (rule.build)(self, data);
            }
        }
        warn!("incoming data not recognized");
        ClassifiedIntent::Unrecognized {
            raw: data.to_string(),
        }
    }

    /// Scan-preview descriptor: what kind of thing is this string?
    /// Returns `None` for unrecognized input.
    pub fn parse_data(&self, data: &str) -> Option<ParsedData> {
        if data.is_empty() {
            return None;
        }
        let (kind, title) = match self.classify(data) {
            ClassifiedIntent::InvoiceUrl { .. } => ("InvoiceUri", "Invoice URL"),
            ClassifiedIntent::PayPro { .. } => ("PayPro", "Payment URL"),
            ClassifiedIntent::BitcoinUri(_) => ("BitcoinUri", "Bitcoin URI"),
            ClassifiedIntent::BitcoinCashUri(_) => ("BitcoinCashUri", "Bitcoin Cash URI"),
            ClassifiedIntent::EthereumUri(_) => ("EthereumUri", "Ethereum URI"),
            ClassifiedIntent::RippleUri(_) => ("RippleUri", "Ripple URI"),
            ClassifiedIntent::DogecoinUri(_) => ("DogecoinUri", "Dogecoin URI"),
            ClassifiedIntent::WalletConnectUri { .. } => {
                ("WalletConnectUri", "WalletConnect URI")
            }
            ClassifiedIntent::PlainUrl { .. } => ("PlainUrl", "Plain URL"),
            ClassifiedIntent::PlainAddress { coin, .. } => match coin {
                Coin::Btc => ("BitcoinAddress", "Bitcoin Address"),
                Coin::Bch => ("BitcoinCashAddress", "Bitcoin Cash Address"),
                Coin::Eth => ("EthereumAddress", "Ethereum Address"),
                Coin::Xrp => ("RippleAddress", "XRP Address"),
                Coin::Doge => ("DogecoinAddress", "Doge Address"),
            },
            ClassifiedIntent::CoinbaseRedirect { .. } => ("Coinbase", "Coinbase URI"),
            ClassifiedIntent::CardUri { .. } => ("Card", "roth Card URI"),
            ClassifiedIntent::RothUri(_) => ("RothUri", "roth URI"),
            ClassifiedIntent::JoinCode { .. } => ("JoinWallet", "Invitation Code"),
            ClassifiedIntent::PrivateKey { .. } => ("PrivateKey", "Private Key"),
            ClassifiedIntent::ImportPrivateKey { .. } => ("ImportPrivateKey", "Import Words"),
            _ => return None,
        };
        Some(ParsedData {
            data: data.to_string(),
            kind,
            title,
        })
    }

    fn app_link(&self, target: &str) -> String {
        format!("{}://{}", self.config.app_scheme, target)
    }
}

fn paypro_coin_hint(data: &str) -> Option<Coin> {
    let scheme = data.split(':').next().unwrap_or_default();
    match scheme {
        "bitcoin" => Some(Coin::Btc),
        "bitcoincash" | "bchtest" => Some(Coin::Bch),
        "ethereum" => Some(Coin::Eth),
        "ripple" => Some(Coin::Xrp),
        "dogecoin" => Some(Coin::Doge),
        _ => None,
    }
}

fn demote(data: &str, reason: &crate::Error) -> ClassifiedIntent {
    // matched predicate, failed secondary validation
    warn!(%reason, "intent payload invalid, demoting to unrecognized");
    ClassifiedIntent::Unrecognized {
        raw: data.to_string(),
    }
}

fn build_chain_uri(coin: Coin, data: &str) -> ClassifiedIntent {
    let payload = match uri::parse_chain_uri(coin, data) {
        Ok(payload) => payload,
        Err(err) => return demote(data, &err),
    };
    let send = SendPayload {
        coin,
        address: payload.address,
        amount: payload.amount,
        message: payload.message,
        required_fee: payload.required_fee,
        destination_tag: payload.destination_tag,
        paypro: payload.paypro.map(|r| uri::paypro_url(&r)),
    };
    match coin {
        Coin::Btc => ClassifiedIntent::BitcoinUri(send),
        Coin::Bch => ClassifiedIntent::BitcoinCashUri(send),
        Coin::Eth => ClassifiedIntent::EthereumUri(send),
        Coin::Xrp => ClassifiedIntent::RippleUri(send),
        Coin::Doge => ClassifiedIntent::DogecoinUri(send),
    }
}

fn is_valid_bch_legacy_uri(data: &str) -> bool {
    let data = uri::sanitize_uri(data);
    if !BCH_LEGACY_SCHEME.is_match(&data) {
        return false;
    }
    let rewritten = BCH_LEGACY_SCHEME.replace(&data, "bitcoin:");
    uri::is_valid_chain_uri(Coin::Btc, &rewritten)
}

fn build_bch_legacy_uri(data: &str) -> ClassifiedIntent {
    let sanitized = uri::sanitize_uri(data);
    let rewritten = BCH_LEGACY_SCHEME.replace(&sanitized, "bitcoin:");
    let payload = match uri::parse_chain_uri(Coin::Btc, &rewritten) {
        Ok(payload) => payload,
        Err(err) => return demote(data, &err),
    };
    let cash_address = match chain::legacy_to_cash_address(&payload.address) {
        Ok(addr) => addr,
        Err(err) => return demote(data, &err),
    };
    warn!(from = %payload.address, to = %cash_address, "legacy address translated");
    ClassifiedIntent::BitcoinCashUri(SendPayload {
        coin: Coin::Bch,
        address: cash_address,
        amount: payload.amount,
        message: payload.message,
        required_fee: None,
        destination_tag: None,
        paypro: payload.paypro.map(|r| uri::paypro_url(&r)),
    })
}

fn build_roth_uri(data: &str) -> ClassifiedIntent {
    let sanitized = uri::sanitize_uri(data);
    let address = uri::extract_address(&sanitized);
    let coin = match uri::query_param(&sanitized, "coin")
        .ok_or_else(|| crate::Error::UnknownCoin("missing coin parameter".to_string()))
        .and_then(|t| Coin::from_ticker(&t).map_err(Into::into))
    {
        Ok(coin) => coin,
        Err(err) => return demote(data, &err),
    };
    let amount = match uri::query_param(&sanitized, "amount").filter(|a| !a.is_empty()) {
        Some(a) => match crate::amount::normalize_amount(&a, coin) {
            Ok(v) => Some(v),
            Err(err) => return demote(data, &err),
        },
        None => None,
    };
    let required_fee = uri::query_param(&sanitized, "gasPrice")
        .and_then(|v| crate::amount::sanitize_decimal(&v).parse::<f64>().ok());
    ClassifiedIntent::RothUri(SendPayload {
        coin,
        address,
        amount,
        message: uri::query_param(&sanitized, "message").filter(|m| !m.is_empty()),
        required_fee,
        destination_tag: None,
        paypro: None,
    })
}

fn is_valid_roth_uri(c: &Classifier, data: &str) -> bool {
    let sanitized = uri::sanitize_uri(data);
    if !sanitized.starts_with(&format!("{}:", c.config.app_scheme)) {
        return false;
    }
    let address = uri::extract_address(&sanitized);
    if address.is_empty() || address.contains("//") {
        return false;
    }
    // an unknown or missing coin parameter invalidates the match
    matches!(
        uri::query_param(&sanitized, "coin").map(|t| Coin::from_ticker(&t)),
        Some(Ok(_))
    )
}

fn build_wyre(c: &Classifier, data: &str) -> ClassifiedIntent {
    if data.starts_with(&c.app_link("wyreError")) {
        return ClassifiedIntent::WyreError;
    }
    if data == c.app_link("wyre") {
        return ClassifiedIntent::WyreRedirect(None);
    }
    let res = uri::unescape_amp(data);
    let order_id = match uri::query_param(&res, "id").filter(|v| !v.is_empty()) {
        Some(id) => id,
        None => {
            debug!("wyre redirect without order id, ignoring");
            return ClassifiedIntent::WyreRedirect(None);
        }
    };
    let p = |name: &str| uri::query_param(&res, name).filter(|v| !v.is_empty());
    ClassifiedIntent::WyreRedirect(Some(WyreOrder {
        transfer_id: p("transferId"),
        wallet_id: p("walletId"),
        owner: p("owner"),
        order_id,
        account_id: p("accountId"),
        dest: p("dest"),
        dest_amount: p("destAmount"),
        dest_currency: p("destCurrency"),
        purchase_amount: p("purchaseAmount"),
        source_amount: p("sourceAmount"),
        source_currency: p("sourceCurrency"),
        status: p("status"),
        created_at: p("createdAt"),
        payment_method_name: p("paymentMethodName"),
        blockchain_network_tx: p("blockchainNetworkTx"),
    }))
}

fn build_private_key(data: &str) -> ClassifiedIntent {
    ClassifiedIntent::PrivateKey {
        key: data.to_string(),
    }
}

const RULES: &[Rule] = &[
    Rule {
        name: "invoice-url",
        matches: |_, d| INVOICE_URL.is_match(d),
        build: |_, d| ClassifiedIntent::InvoiceUrl { url: d.to_string() },
    },
    Rule {
        name: "invoice-unlock",
        matches: |_, d| d.contains("unlock"),
        build: |_, d| ClassifiedIntent::InvoiceUnlock { raw: d.to_string() },
    },
    Rule {
        name: "paypro",
        matches: |_, d| PAYPRO_URI.is_match(&uri::sanitize_uri(d)),
        build: |_, d| {
            let sanitized = uri::sanitize_uri(d);
            ClassifiedIntent::PayPro {
                url: uri::paypro_url(&sanitized),
                coin: paypro_coin_hint(&sanitized),
            }
        },
    },
    Rule {
        name: "bitcoin-uri",
        matches: |_, d| uri::is_valid_chain_uri(Coin::Btc, d),
        build: |_, d| build_chain_uri(Coin::Btc, d),
    },
    Rule {
        name: "bitcoincash-uri",
        matches: |_, d| uri::is_valid_chain_uri(Coin::Bch, d),
        build: |_, d| build_chain_uri(Coin::Bch, d),
    },
    Rule {
        name: "ethereum-uri",
        matches: |_, d| uri::is_valid_chain_uri(Coin::Eth, d),
        build: |_, d| build_chain_uri(Coin::Eth, d),
    },
    Rule {
        name: "ripple-uri",
        matches: |_, d| uri::is_valid_chain_uri(Coin::Xrp, d),
        build: |_, d| build_chain_uri(Coin::Xrp, d),
    },
    Rule {
        name: "dogecoin-uri",
        matches: |_, d| uri::is_valid_chain_uri(Coin::Doge, d),
        build: |_, d| build_chain_uri(Coin::Doge, d),
    },
    Rule {
        name: "walletconnect-uri",
        matches: |_, d| WALLET_CONNECT.is_match(d),
        build: |_, d| ClassifiedIntent::WalletConnectUri { uri: d.to_string() },
    },
    Rule {
        name: "bitcoincash-legacy-uri",
        matches: |_, d| is_valid_bch_legacy_uri(d),
        build: |_, d| build_bch_legacy_uri(d),
    },
    Rule {
        name: "plain-url",
        matches: |_, d| !INVOICE_URL.is_match(d) && PLAIN_URL.is_match(&uri::sanitize_uri(d)),
        build: |_, d| ClassifiedIntent::PlainUrl { url: d.to_string() },
    },
    Rule {
        name: "bitcoin-address",
        matches: |_, d| chain::is_valid_bitcoin_address(d),
        build: |_, d| ClassifiedIntent::PlainAddress {
            coin: Coin::Btc,
            address: d.to_string(),
        },
    },
    Rule {
        name: "bitcoincash-address",
        matches: |_, d| chain::is_valid_cash_address(d),
        build: |_, d| ClassifiedIntent::PlainAddress {
            coin: Coin::Bch,
            address: d.to_string(),
        },
    },
    Rule {
        name: "ethereum-address",
        matches: |_, d| chain::is_valid_ethereum_address(d),
        build: |_, d| ClassifiedIntent::PlainAddress {
            coin: Coin::Eth,
            address: d.to_string(),
        },
    },
    Rule {
        name: "ripple-address",
        matches: |_, d| chain::is_valid_ripple_address(d),
        build: |_, d| ClassifiedIntent::PlainAddress {
            coin: Coin::Xrp,
            address: d.to_string(),
        },
    },
    Rule {
        name: "dogecoin-address",
        matches: |_, d| chain::is_valid_dogecoin_address(d),
        build: |_, d| ClassifiedIntent::PlainAddress {
            coin: Coin::Doge,
            address: d.to_string(),
        },
    },
    Rule {
        name: "coinbase-redirect",
        matches: |c, d| d.starts_with(&c.app_link("coinbase")),
        build: |_, d| ClassifiedIntent::CoinbaseRedirect {
            code: uri::query_param(d, "code"),
        },
    },
    Rule {
        name: "simplex-redirect",
        matches: |c, d| d.starts_with(&c.app_link("simplex")),
        build: |_, d| {
            let res = uri::unescape_amp(d);
            ClassifiedIntent::SimplexRedirect(SimplexParams {
                success: uri::query_param(&res, "success"),
                payment_id: uri::query_param(&res, "paymentId"),
                quote_id: uri::query_param(&res, "quoteId"),
                user_id: uri::query_param(&res, "userId"),
            })
        },
    },
    Rule {
        name: "wyre-redirect",
        matches: |c, d| {
            d.starts_with(&c.app_link("wyre")) || d.starts_with(&c.app_link("wyreError"))
        },
        build: build_wyre,
    },
    Rule {
        name: "invoice-intent",
        matches: |c, d| d.starts_with(&c.app_link("invoice")),
        build: |_, d| ClassifiedIntent::InvoiceIntent {
            url: uri::query_param(d, "url").filter(|u| !u.is_empty()),
        },
    },
    Rule {
        name: "landing-redirect",
        matches: |_, d| d.starts_with("roth://landing"),
        build: |_, d| ClassifiedIntent::CardRedirLink {
            target: d.replacen("roth://landing/", "", 1),
        },
    },
    Rule {
        name: "card-uri",
        matches: |_, d| d.starts_with("roth://roth"),
        build: |_, d| ClassifiedIntent::CardUri { raw: d.to_string() },
    },
    Rule {
        name: "roth-uri",
        matches: is_valid_roth_uri,
        build: |_, d| build_roth_uri(d),
    },
    Rule {
        name: "join-code",
        matches: |_, d| JOIN_CODE.is_match(d) || JOIN_LEGACY_CODE.is_match(d),
        build: |_, d| ClassifiedIntent::JoinCode { code: d.to_string() },
    },
    Rule {
        name: "private-key",
        matches: |_, d| d.starts_with("6P") || chain::is_valid_wif_private_key(d),
        build: |_, d| build_private_key(d),
    },
    Rule {
        name: "import-private-key",
        matches: |_, d| d.starts_with("1|") || d.starts_with("2|") || d.starts_with("3|"),
        build: |_, d| ClassifiedIntent::ImportPrivateKey { code: d.to_string() },
    },
    Rule {
        name: "wallet-card",
        matches: |_, d| d.contains("wallet-card"),
        build: |_, d| match wallet_card::parse_wallet_card(d) {
            Ok(event) => ClassifiedIntent::WalletCard(event),
            Err(err) => demote(d, &err),
        },
    },
    Rule {
        name: "dynamic-link",
        matches: |_, d| d.starts_with("com.roth.wallet://google/link"),
        build: |_, d| ClassifiedIntent::DynamicLink {
            deep_link: uri::query_param(d, "deep_link_id").filter(|l| !l.is_empty()),
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    const BTC_ADDR: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    fn classifier() -> Classifier {
        Classifier::default()
    }

    #[test]
    fn test_invoice_beats_plain_url() {
        let intent = classifier().classify("https://roth.com/i/abc123");
        assert!(matches!(intent, ClassifiedIntent::InvoiceUrl { .. }));
        let intent = classifier().classify("https://test.roth.com/i/abc123");
        assert!(matches!(intent, ClassifiedIntent::InvoiceUrl { .. }));
        let intent = classifier().classify("https://roth.com/about");
        assert!(matches!(intent, ClassifiedIntent::PlainUrl { .. }));
    }

    #[test]
    fn test_paypro_beats_chain_uri() {
        let intent = classifier().classify("bitcoin:?r=https://roth.test/i/abc");
        match intent {
            ClassifiedIntent::PayPro { url, coin } => {
                assert_eq!(url, "https://roth.test/i/abc");
                assert_eq!(coin, Some(Coin::Btc));
            }
            other => panic!("expected PayPro, got {other:?}"),
        }
    }

    #[test]
    fn test_bitcoin_uri() {
        let intent = classifier().classify(&format!("bitcoin:{BTC_ADDR}?amount=0.5"));
        match intent {
            ClassifiedIntent::BitcoinUri(p) => {
                assert_eq!(p.address, BTC_ADDR);
                assert_eq!(p.amount, Some(50_000_000));
            }
            other => panic!("expected BitcoinUri, got {other:?}"),
        }
    }

    #[test]
    fn test_bch_legacy_uri_rewritten() {
        let intent = classifier().classify("bitcoincash:1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu");
        match intent {
            ClassifiedIntent::BitcoinCashUri(p) => {
                assert_eq!(
                    p.address,
                    "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"
                );
            }
            other => panic!("expected BitcoinCashUri, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_addresses() {
        let intent = classifier().classify(BTC_ADDR);
        assert!(matches!(
            intent,
            ClassifiedIntent::PlainAddress { coin: Coin::Btc, .. }
        ));
        let intent = classifier().classify("0x52908400098527886E0F7030069857D2E4169EE7");
        assert!(matches!(
            intent,
            ClassifiedIntent::PlainAddress { coin: Coin::Eth, .. }
        ));
        let intent = classifier().classify("rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh");
        assert!(matches!(
            intent,
            ClassifiedIntent::PlainAddress { coin: Coin::Xrp, .. }
        ));
    }

    #[test]
    fn test_roth_uri_requires_coin() {
        let with_coin = classifier().classify(&format!("roth:{BTC_ADDR}?coin=btc&amount=1"));
        match with_coin {
            ClassifiedIntent::RothUri(p) => {
                assert_eq!(p.coin, Coin::Btc);
                assert_eq!(p.amount, Some(100_000_000));
            }
            other => panic!("expected RothUri, got {other:?}"),
        }
        // no coin parameter: rejected, not defaulted
        let without = classifier().classify(&format!("roth:{BTC_ADDR}?amount=1"));
        assert!(matches!(without, ClassifiedIntent::Unrecognized { .. }));
        // unknown coin: rejected
        let unknown = classifier().classify(&format!("roth:{BTC_ADDR}?coin=ltc"));
        assert!(matches!(unknown, ClassifiedIntent::Unrecognized { .. }));
    }

    #[test]
    fn test_join_code_boundaries() {
        let code69: String = "2".repeat(69);
        let code70: String = "2".repeat(70);
        assert!(matches!(
            classifier().classify(&code69),
            ClassifiedIntent::Unrecognized { .. }
        ));
        assert!(matches!(
            classifier().classify(&code70),
            ClassifiedIntent::JoinCode { .. }
        ));
        assert!(matches!(
            classifier().classify(&format!("roth:{code70}")),
            ClassifiedIntent::JoinCode { .. }
        ));
    }

    #[test]
    fn test_wallet_connect() {
        assert!(matches!(
            classifier().classify("wc:abc123@1?bridge=x&key=y"),
            ClassifiedIntent::WalletConnectUri { .. }
        ));
    }

    #[test]
    fn test_app_redirects() {
        let intent = classifier().classify("roth://coinbase?code=authcode");
        assert_eq!(
            intent,
            ClassifiedIntent::CoinbaseRedirect {
                code: Some("authcode".to_string())
            }
        );

        let intent = classifier().classify("roth://simplex?success=true&amp;paymentId=p1");
        match intent {
            ClassifiedIntent::SimplexRedirect(p) => {
                assert_eq!(p.success.as_deref(), Some("true"));
                assert_eq!(p.payment_id.as_deref(), Some("p1"));
            }
            other => panic!("expected Simplex, got {other:?}"),
        }

        let intent = classifier().classify("roth://wyre?id=order1&dest=addr");
        match intent {
            ClassifiedIntent::WyreRedirect(Some(order)) => {
                assert_eq!(order.order_id, "order1");
                assert_eq!(order.dest.as_deref(), Some("addr"));
            }
            other => panic!("expected Wyre, got {other:?}"),
        }

        // no order id: acknowledged but carries no order
        assert_eq!(
            classifier().classify("roth://wyre?status=ok"),
            ClassifiedIntent::WyreRedirect(None)
        );
        assert_eq!(classifier().classify("roth://wyreError"), ClassifiedIntent::WyreError);
    }

    #[test]
    fn test_private_key_classification() {
        assert!(matches!(
            classifier().classify("6PYNKZ1EAgYgmQfmNVamxyXVWHzK5s6DGhwP4J5o44cvXdoY7sRzhtpUeo"),
            ClassifiedIntent::PrivateKey { .. }
        ));
        assert!(matches!(
            classifier().classify("5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ"),
            ClassifiedIntent::PrivateKey { .. }
        ));
        assert!(matches!(
            classifier().classify("1|word word word"),
            ClassifiedIntent::ImportPrivateKey { .. }
        ));
        // txid look-alike stays unrecognized
        assert!(matches!(
            classifier()
                .classify("4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"),
            ClassifiedIntent::Unrecognized { .. }
        ));
    }

    #[test]
    fn test_unlock_marker() {
        assert!(matches!(
            classifier().classify("https://link.test/unlock?i/abc"),
            ClassifiedIntent::InvoiceUnlock { .. }
        ));
    }

    #[test]
    fn test_dynamic_link() {
        let intent =
            classifier().classify("com.roth.wallet://google/link?deep_link_id=https%3A%2F%2Fx");
        assert_eq!(
            intent,
            ClassifiedIntent::DynamicLink {
                deep_link: Some("https://x".to_string())
            }
        );
    }

    #[test]
    fn test_parse_data_preview() {
        let parsed = classifier().parse_data(BTC_ADDR).unwrap();
        assert_eq!(parsed.kind, "BitcoinAddress");
        assert_eq!(parsed.title, "Bitcoin Address");
        assert!(classifier().parse_data("garbage input").is_none());
        assert!(classifier().parse_data("").is_none());
    }
}
