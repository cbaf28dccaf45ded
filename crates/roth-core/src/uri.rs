//! URI string helpers shared by the classifier
//!
//! These reproduce the exact sanitization and extraction behavior the
//! classifier's predicates depend on: locale fixes for scanned amounts,
//! scheme/query stripping, and query-parameter lookup with percent and
//! plus-sign decoding.

use crate::{amount, chain, Error, Result};
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use roth_params::Coin;

static AMOUNT_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[?&]amount=(\d+([,.]\d+)?)").unwrap());
static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-z]+:").unwrap());
static TRAILING_PARAMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([?&]+[a-z]+=(\d+([,.]\d+)?))+").unwrap());
static PAYPRO_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(bitcoin|bitcoincash|ethereum|ripple|dogecoin)?:\?r=").unwrap());

/// Fix amounts scanned in locales that use a comma decimal separator
pub fn sanitize_uri(data: &str) -> String {
    match AMOUNT_PARAM.find(data) {
        Some(m) => {
            let fixed = m.as_str().replacen(',', ".", 1);
            data.replacen(m.as_str(), &fixed, 1)
        }
        None => data.to_string(),
    }
}

/// Strip the scheme and any query string, leaving the bare address
pub fn extract_address(data: &str) -> String {
    let no_scheme = SCHEME.replace(data, "");
    let no_query = match no_scheme.split_once('?') {
        Some((head, _)) => head.to_string(),
        None => no_scheme.into_owned(),
    };
    TRAILING_PARAMS.replace(&no_query, "").into_owned()
}

/// Strip the payment-protocol prefix and percent-decode the target URL
pub fn paypro_url(data: &str) -> String {
    let stripped = PAYPRO_PREFIX.replace(data, "");
    percent_decode_str(&stripped)
        .decode_utf8_lossy()
        .into_owned()
}

/// Look up a query parameter by name. Distinguishes a missing parameter
/// (`None`) from a bare one (`Some("")`); decodes `+` and percent escapes.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let query = url.split_once('?').map(|(_, q)| q)?;
    let query = query.split_once('#').map(|(q, _)| q).unwrap_or(query);
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some((key, value)) if key == name => {
                let unplussed = value.replace('+', " ");
                return Some(
                    percent_decode_str(&unplussed)
                        .decode_utf8_lossy()
                        .into_owned(),
                );
            }
            None if pair == name => return Some(String::new()),
            _ => {}
        }
    }
    None
}

/// Undo HTML-entity escaping of ampersands in app-link redirects
pub fn unescape_amp(data: &str) -> String {
    data.replace("&amp;", "&")
}

/// Payload parsed out of a chain payment URI
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainUriPayload {
    /// Recipient address (may be empty for payment-protocol-only URIs)
    pub address: String,
    /// Amount in the coin's minor unit
    pub amount: Option<u128>,
    /// Free-form message/memo
    pub message: Option<String>,
    /// Payment-protocol redirect pointer (`r` parameter)
    pub paypro: Option<String>,
    /// Required fee override (gas price for Ethereum)
    pub required_fee: Option<f64>,
    /// Destination tag for tagged ledgers
    pub destination_tag: Option<String>,
}

fn scheme_matches(coin: Coin, data: &str) -> bool {
    if data.starts_with(&format!("{}:", coin.uri_scheme())) {
        return true;
    }
    // testnet Bitcoin Cash URIs carry their own scheme
    coin == Coin::Bch && data.starts_with("bchtest:")
}

/// Check whether a string is a well-formed payment URI for the given coin:
/// the scheme must match and the embedded address must validate, unless the
/// URI only carries a payment-protocol pointer.
pub fn is_valid_chain_uri(coin: Coin, data: &str) -> bool {
    let data = sanitize_uri(data);
    if !scheme_matches(coin, &data) {
        return false;
    }
    let address = extract_address(&data);
    if address.is_empty() {
        return query_param(&data, "r").is_some();
    }
    match coin {
        Coin::Btc => chain::is_valid_bitcoin_address(&address),
        Coin::Bch => chain::is_valid_cash_address(&address),
        Coin::Eth => chain::is_valid_ethereum_address(&address),
        Coin::Xrp => chain::is_valid_ripple_address(&address),
        Coin::Doge => chain::is_valid_dogecoin_address(&address),
    }
}

/// Parse a chain payment URI into its payload, normalizing the amount to
/// minor units per coin
pub fn parse_chain_uri(coin: Coin, data: &str) -> Result<ChainUriPayload> {
    let data = sanitize_uri(data);
    if !scheme_matches(coin, &data) {
        return Err(Error::InvalidUri(format!(
            "expected {} scheme: {data}",
            coin.uri_scheme()
        )));
    }
    let address = extract_address(&data);
    let message = query_param(&data, "message").filter(|m| !m.is_empty());
    let paypro = query_param(&data, "r").filter(|r| !r.is_empty());

    let amount = match coin {
        // `value` is already in wei
        Coin::Eth => match query_param(&data, "value") {
            Some(v) if !v.is_empty() => Some(amount::parse_minor_amount(&v)?),
            _ => None,
        },
        _ => match query_param(&data, "amount") {
            Some(v) if !v.is_empty() => Some(amount::normalize_amount(&v, coin)?),
            _ => None,
        },
    };

    let required_fee = match coin {
        Coin::Eth => query_param(&data, "gasPrice")
            .and_then(|v| amount::sanitize_decimal(&v).parse::<f64>().ok()),
        _ => None,
    };
    let destination_tag = match coin {
        Coin::Xrp => query_param(&data, "dt").filter(|t| !t.is_empty()),
        _ => None,
    };

    Ok(ChainUriPayload {
        address,
        amount,
        message,
        paypro,
        required_fee,
        destination_tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_comma_amount() {
        assert_eq!(
            sanitize_uri("bitcoin:1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa?amount=1,5"),
            "bitcoin:1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa?amount=1.5"
        );
        // untouched when no amount parameter present
        assert_eq!(sanitize_uri("bitcoin:abc"), "bitcoin:abc");
    }

    #[test]
    fn test_extract_address() {
        assert_eq!(
            extract_address("bitcoin:1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa?amount=1"),
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"
        );
        assert_eq!(
            extract_address("ethereum:0x52908400098527886E0F7030069857D2E4169EE7"),
            "0x52908400098527886E0F7030069857D2E4169EE7"
        );
    }

    #[test]
    fn test_query_param() {
        let url = "app://simplex?success=true&paymentId=abc%20def&empty=&plus=a+b";
        assert_eq!(query_param(url, "success").as_deref(), Some("true"));
        assert_eq!(query_param(url, "paymentId").as_deref(), Some("abc def"));
        assert_eq!(query_param(url, "empty").as_deref(), Some(""));
        assert_eq!(query_param(url, "plus").as_deref(), Some("a b"));
        assert_eq!(query_param(url, "missing"), None);
    }

    #[test]
    fn test_paypro_url() {
        assert_eq!(
            paypro_url("bitcoin:?r=https%3A%2F%2Froth.com%2Fi%2Fabc"),
            "https://roth.com/i/abc"
        );
        assert_eq!(paypro_url(":?r=https://x.test/i/1"), "https://x.test/i/1");
    }

    #[test]
    fn test_parse_bitcoin_uri() {
        let payload = parse_chain_uri(
            Coin::Btc,
            "bitcoin:1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa?amount=0.5&message=hi",
        )
        .unwrap();
        assert_eq!(payload.address, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        assert_eq!(payload.amount, Some(50_000_000));
        assert_eq!(payload.message.as_deref(), Some("hi"));
        assert!(payload.paypro.is_none());
    }

    #[test]
    fn test_parse_ripple_uri() {
        let payload = parse_chain_uri(
            Coin::Xrp,
            "ripple:rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh?amount=1.5&dt=12345",
        )
        .unwrap();
        assert_eq!(payload.amount, Some(1_500_000));
        assert_eq!(payload.destination_tag.as_deref(), Some("12345"));
    }

    #[test]
    fn test_parse_ethereum_uri() {
        let payload = parse_chain_uri(
            Coin::Eth,
            "ethereum:0x52908400098527886E0F7030069857D2E4169EE7?value=2000000000000000000&gasPrice=40",
        )
        .unwrap();
        assert_eq!(payload.amount, Some(2_000_000_000_000_000_000));
        assert_eq!(payload.required_fee, Some(40.0));
    }

    #[test]
    fn test_uri_validity() {
        assert!(is_valid_chain_uri(
            Coin::Btc,
            "bitcoin:1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"
        ));
        assert!(!is_valid_chain_uri(Coin::Btc, "bitcoin:notanaddress"));
        // address-less but carries a payment-protocol pointer
        assert!(is_valid_chain_uri(Coin::Btc, "bitcoin:?r=https://x.test"));
        assert!(!is_valid_chain_uri(Coin::Btc, "dogecoin:whatever"));
    }
}
