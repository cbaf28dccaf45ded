//! Amount normalization to minor units
//!
//! All amounts leaving the classifier are integers in the coin's minor unit
//! (satoshis, wei, drops). Display-unit values are scaled by the coin's
//! fixed multiplier and rounded half away from zero.

use crate::{Error, Result};
use roth_params::Coin;

/// Rewrite a comma decimal separator to a period. Some locales scan QR
/// amounts as `1,5`.
pub fn sanitize_decimal(value: &str) -> String {
    value.replacen(',', ".", 1)
}

/// Convert a display-unit amount string to the coin's minor unit
pub fn normalize_amount(value: &str, coin: Coin) -> Result<u128> {
    let cleaned = sanitize_decimal(value.trim());
    let parsed: f64 = cleaned
        .parse()
        .map_err(|_| Error::InvalidAmount(value.to_string()))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(Error::InvalidAmount(value.to_string()));
    }
    let minor = (parsed * coin.unit_to_minor()).round();
    if minor > u128::MAX as f64 {
        return Err(Error::AmountOverflow(value.to_string()));
    }
    Ok(minor as u128)
}

/// Parse an amount that is already expressed in minor units (e.g. wei in an
/// `ethereum:` URI `value` parameter)
pub fn parse_minor_amount(value: &str) -> Result<u128> {
    let cleaned = sanitize_decimal(value.trim());
    if let Ok(v) = cleaned.parse::<u128>() {
        return Ok(v);
    }
    // fractional minor-unit values round to the nearest integer
    let parsed: f64 = cleaned
        .parse()
        .map_err(|_| Error::InvalidAmount(value.to_string()))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(Error::InvalidAmount(value.to_string()));
    }
    Ok(parsed.round() as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_xrp() {
        assert_eq!(normalize_amount("1.5", Coin::Xrp).unwrap(), 1_500_000);
    }

    #[test]
    fn test_normalize_btc() {
        assert_eq!(normalize_amount("0.001", Coin::Btc).unwrap(), 100_000);
        assert_eq!(normalize_amount("1", Coin::Btc).unwrap(), 100_000_000);
    }

    #[test]
    fn test_comma_separator() {
        assert_eq!(normalize_amount("1,5", Coin::Xrp).unwrap(), 1_500_000);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 0.000000015 BTC = 1.5 satoshi, rounds to 2
        assert_eq!(normalize_amount("0.000000015", Coin::Btc).unwrap(), 2);
    }

    #[test]
    fn test_minor_amount() {
        assert_eq!(
            parse_minor_amount("2000000000000000000").unwrap(),
            2_000_000_000_000_000_000
        );
        assert!(parse_minor_amount("abc").is_err());
        assert!(parse_minor_amount("-1").is_err());
    }

    #[test]
    fn test_invalid_amounts() {
        assert!(normalize_amount("1.2.3", Coin::Btc).is_err());
        assert!(normalize_amount("-1", Coin::Btc).is_err());
    }
}
