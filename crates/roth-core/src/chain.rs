//! Per-chain address validation and conversion primitives
//!
//! Thin validity checks over the address encodings the classifier has to
//! recognize: base58check (Bitcoin, Dogecoin, WIF keys), bech32 segwit,
//! CashAddr (Bitcoin Cash, including rewriting from the legacy base58
//! form), hex (Ethereum) and the Ripple base58 alphabet.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// CashAddr digit alphabet (shared with bech32)
const CASHADDR_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Livenet CashAddr prefix
pub const CASHADDR_PREFIX_LIVENET: &str = "bitcoincash";
/// Testnet CashAddr prefix
pub const CASHADDR_PREFIX_TESTNET: &str = "bchtest";

static ETH_ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap());
static WIF_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[5KL][1-9A-HJ-NP-Za-km-z]{50,51}$").unwrap());

fn base58check(data: &str) -> Option<Vec<u8>> {
    bs58::decode(data).with_check(None).into_vec().ok()
}

/// Validate a Bitcoin address on either network (legacy base58 or segwit)
pub fn is_valid_bitcoin_address(data: &str) -> bool {
    if let Some(payload) = base58check(data) {
        if payload.len() == 21 {
            // livenet P2PKH/P2SH or testnet equivalents
            return matches!(payload[0], 0x00 | 0x05 | 0x6f | 0xc4);
        }
    }
    if let Ok((hrp, _)) = bech32::decode(data) {
        let hrp = hrp.to_lowercase();
        return hrp == "bc" || hrp == "tb";
    }
    false
}

/// Validate a Bitcoin-Core-style legacy address (used by Bitcoin Cash rewrites)
pub fn is_valid_legacy_address(data: &str) -> bool {
    match base58check(data) {
        Some(payload) => payload.len() == 21 && matches!(payload[0], 0x00 | 0x05 | 0x6f | 0xc4),
        None => false,
    }
}

/// Validate a Dogecoin address on either network
pub fn is_valid_dogecoin_address(data: &str) -> bool {
    match base58check(data) {
        // 0x1e/0x16 livenet P2PKH/P2SH, 0x71/0xc4 testnet
        Some(payload) => payload.len() == 21 && matches!(payload[0], 0x1e | 0x16 | 0x71 | 0xc4),
        None => false,
    }
}

/// Validate an Ethereum address
pub fn is_valid_ethereum_address(data: &str) -> bool {
    ETH_ADDRESS.is_match(data)
}

/// Validate a Ripple classic address
pub fn is_valid_ripple_address(data: &str) -> bool {
    if !data.starts_with('r') || data.len() < 25 || data.len() > 35 {
        return false;
    }
    match bs58::decode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .with_check(None)
        .into_vec()
    {
        Ok(payload) => payload.len() == 21 && payload[0] == 0x00,
        Err(_) => false,
    }
}

/// Check that a string has the shape of a WIF private key and carries a
/// valid base58 checksum with the WIF version byte. Filters out look-alike
/// data such as transaction ids.
pub fn is_valid_wif_private_key(data: &str) -> bool {
    if !WIF_SHAPE.is_match(data) {
        return false;
    }
    match base58check(data) {
        Some(payload) => {
            payload.first() == Some(&0x80) && matches!(payload.len(), 33 | 34)
        }
        None => false,
    }
}

fn cashaddr_polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x0007_ffff_ffff) << 5) ^ u64::from(d);
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}

fn cashaddr_expand_prefix(prefix: &str) -> Vec<u8> {
    let mut out: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    out.push(0);
    out
}

fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::new();
    let maxv: u32 = (1 << to) - 1;
    for &value in data {
        if u32::from(value) >> from != 0 {
            return None;
        }
        acc = (acc << from) | u32::from(value);
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & maxv) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & maxv) != 0 {
        return None;
    }
    Some(out)
}

fn cashaddr_decode_payload(prefix: &str, payload: &str) -> Option<Vec<u8>> {
    let mut values = Vec::with_capacity(payload.len());
    for ch in payload.bytes() {
        let pos = CASHADDR_CHARSET
            .iter()
            .position(|&c| c == ch.to_ascii_lowercase())?;
        values.push(pos as u8);
    }
    let mut checked = cashaddr_expand_prefix(prefix);
    checked.extend_from_slice(&values);
    if cashaddr_polymod(&checked) != 0 {
        return None;
    }
    Some(values)
}

/// Validate a CashAddr-format Bitcoin Cash address, with or without the
/// `bitcoincash:`/`bchtest:` prefix
pub fn is_valid_cash_address(data: &str) -> bool {
    let (prefixes, payload): (Vec<&str>, &str) = match data.split_once(':') {
        Some((p, rest)) => (vec![p], rest),
        None => (
            vec![CASHADDR_PREFIX_LIVENET, CASHADDR_PREFIX_TESTNET],
            data,
        ),
    };
    if payload.len() < 42 {
        return false;
    }
    prefixes
        .iter()
        .any(|prefix| cashaddr_decode_payload(prefix, payload).is_some())
}

fn cashaddr_encode(prefix: &str, version: u8, hash: &[u8]) -> Result<String> {
    let mut payload = Vec::with_capacity(1 + hash.len());
    payload.push(version);
    payload.extend_from_slice(hash);
    let data = convert_bits(&payload, 8, 5, true)
        .ok_or_else(|| Error::InvalidAddress("cashaddr bit conversion failed".to_string()))?;

    let mut checksum_input = cashaddr_expand_prefix(prefix);
    checksum_input.extend_from_slice(&data);
    checksum_input.extend_from_slice(&[0u8; 8]);
    let checksum = cashaddr_polymod(&checksum_input);

    let mut out = String::with_capacity(prefix.len() + 1 + data.len() + 8);
    out.push_str(prefix);
    out.push(':');
    for d in &data {
        out.push(CASHADDR_CHARSET[*d as usize] as char);
    }
    for i in 0..8 {
        let d = ((checksum >> (5 * (7 - i))) & 0x1f) as usize;
        out.push(CASHADDR_CHARSET[d] as char);
    }
    Ok(out)
}

/// Rewrite a legacy base58 Bitcoin Cash address into CashAddr form
pub fn legacy_to_cash_address(legacy: &str) -> Result<String> {
    let payload = base58check(legacy)
        .ok_or_else(|| Error::InvalidAddress(format!("not base58check: {legacy}")))?;
    if payload.len() != 21 {
        return Err(Error::InvalidAddress(format!(
            "unexpected payload length for {legacy}"
        )));
    }
    let (cash_version, prefix) = match payload[0] {
        0x00 => (0x00, CASHADDR_PREFIX_LIVENET), // P2PKH
        0x05 => (0x08, CASHADDR_PREFIX_LIVENET), // P2SH
        0x6f => (0x00, CASHADDR_PREFIX_TESTNET),
        0xc4 => (0x08, CASHADDR_PREFIX_TESTNET),
        v => {
            return Err(Error::InvalidAddress(format!(
                "unsupported version byte {v:#04x}"
            )))
        }
    };
    cashaddr_encode(prefix, cash_version, &payload[1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    // Genesis block coinbase address
    const BTC_P2PKH: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
    const BTC_P2SH: &str = "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy";
    const BTC_BECH32: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
    const BCH_CASHADDR: &str = "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";
    const DOGE_ADDR: &str = "DH5yaieqoZN36fDVciNyRueRGvGLR3mr7L";
    const XRP_ADDR: &str = "rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh";
    const ETH_ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    #[test]
    fn test_bitcoin_addresses() {
        assert!(is_valid_bitcoin_address(BTC_P2PKH));
        assert!(is_valid_bitcoin_address(BTC_P2SH));
        assert!(is_valid_bitcoin_address(BTC_BECH32));
        assert!(!is_valid_bitcoin_address("1A1zP1eP5QGefi2DMPTfTL5SLmv7Divf"));
        assert!(!is_valid_bitcoin_address(ETH_ADDR));
    }

    #[test]
    fn test_cash_addresses() {
        assert!(is_valid_cash_address(BCH_CASHADDR));
        // bare payload, either network prefix tried
        assert!(is_valid_cash_address(
            "qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"
        ));
        assert!(!is_valid_cash_address(BTC_P2PKH));
        assert!(!is_valid_cash_address(
            "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6b"
        ));
    }

    #[test]
    fn test_legacy_rewrite() {
        // BCH test vector: legacy 1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu
        let cash = legacy_to_cash_address("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu").unwrap();
        assert_eq!(
            cash,
            "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"
        );
        assert!(is_valid_cash_address(&cash));
        assert!(legacy_to_cash_address("notanaddress").is_err());
    }

    #[test]
    fn test_other_chains() {
        assert!(is_valid_ethereum_address(ETH_ADDR));
        assert!(!is_valid_ethereum_address("0x123"));
        assert!(is_valid_ripple_address(XRP_ADDR));
        assert!(!is_valid_ripple_address(BTC_P2PKH));
        assert!(is_valid_dogecoin_address(DOGE_ADDR));
        assert!(!is_valid_dogecoin_address(BTC_P2PKH));
    }

    #[test]
    fn test_wif_shape_rejects_txid() {
        // 64 hex chars, shape mismatch
        let txid = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
        assert!(!is_valid_wif_private_key(txid));
        // right alphabet and length but broken checksum
        assert!(!is_valid_wif_private_key(
            "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTp"
        ));
        // canonical uncompressed WIF example
        assert!(is_valid_wif_private_key(
            "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ"
        ));
    }
}
