//! Payment-protocol resolution against stubbed servers and wallets

use async_trait::async_trait;
use roth_id::paypro::{
    PayProClient, PayProDetails, PayProInstructions, PayProOptions, PayProOutput, PayProResolution,
    PayProResolver, PaymentOption, WalletLookup,
};
use roth_id::{Error, Result};
use roth_params::Coin;
use std::collections::HashMap;
use std::sync::Arc;

struct StubPayPro {
    options: PayProOptions,
    details: PayProDetails,
}

#[async_trait]
impl PayProClient for StubPayPro {
    async fn options(&self, _payment_url: &str) -> Result<PayProOptions> {
        Ok(self.options.clone())
    }

    async fn details(&self, _payment_url: &str, _coin: Coin) -> Result<PayProDetails> {
        Ok(self.details.clone())
    }
}

struct StubWallets {
    counts: HashMap<Coin, usize>,
}

impl WalletLookup for StubWallets {
    fn funded_wallet_count(&self, coin: Coin, _network: &str, _min_amount: u64) -> usize {
        self.counts.get(&coin).copied().unwrap_or(0)
    }
}

fn option(currency: &str, amount: u64, selected: bool) -> PaymentOption {
    PaymentOption {
        currency: currency.to_string(),
        network: "livenet".to_string(),
        estimated_amount: amount,
        miner_fee: 0,
        selected,
        disabled: false,
    }
}

fn details(to_address: &str, fee_rate: Option<f64>) -> PayProDetails {
    PayProDetails {
        memo: Some("Payment request for invoice abc".to_string()),
        network: Some("livenet".to_string()),
        required_fee_rate: fee_rate,
        instructions: vec![PayProInstructions {
            to_address: Some(to_address.to_string()),
            outputs: vec![PayProOutput {
                amount: 1000,
                address: Some(to_address.to_string()),
                invoice_id: None,
            }],
            required_fee_rate: None,
            data: None,
        }],
    }
}

fn resolver(options: PayProOptions, details: PayProDetails, counts: &[(Coin, usize)]) -> PayProResolver {
    PayProResolver::new(
        Arc::new(StubPayPro { options, details }),
        Arc::new(StubWallets {
            counts: counts.iter().copied().collect(),
        }),
    )
}

#[tokio::test]
async fn test_preselected_currency_wins() {
    let options = PayProOptions {
        payment_options: vec![option("BTC", 1000, true), option("ETH", 2000, false)],
        ..Default::default()
    };
    let resolver = resolver(options, details("1BtcAddr", Some(12.3)), &[]);
    match resolver.resolve("https://roth.com/i/abc").await.unwrap() {
        PayProResolution::Confirm(params) => {
            assert_eq!(params.coin, Coin::Btc);
            assert_eq!(params.amount, 1000);
            assert_eq!(params.to_address, "1BtcAddr");
            // per-byte rate scaled to per-kilobyte and rounded up
            assert_eq!(params.required_fee_rate, Some(12300.0));
            assert_eq!(params.pay_pro_url, "https://roth.com/i/abc");
        }
        other => panic!("expected Confirm, got {other:?}"),
    }
}

#[tokio::test]
async fn test_single_funded_wallet_decides() {
    let options = PayProOptions {
        payment_options: vec![option("BTC", 1000, false), option("ETH", 2000, false)],
        ..Default::default()
    };
    let resolver = resolver(
        options,
        details("0xEthAddr", Some(40.0)),
        &[(Coin::Eth, 1)],
    );
    match resolver.resolve("https://roth.com/i/abc").await.unwrap() {
        PayProResolution::Confirm(params) => {
            assert_eq!(params.coin, Coin::Eth);
            // non-UTXO rates pass through unscaled
            assert_eq!(params.required_fee_rate, Some(40.0));
        }
        other => panic!("expected Confirm, got {other:?}"),
    }
}

#[tokio::test]
async fn test_tie_asks_the_user() {
    let options = PayProOptions {
        payment_options: vec![
            option("BTC", 1000, false),
            option("ETH", 2000, false),
            option("DOGE", 500, false),
        ],
        ..Default::default()
    };
    let resolver = resolver(
        options,
        details("addr", None),
        &[(Coin::Btc, 2), (Coin::Eth, 1)],
    );
    match resolver.resolve("https://roth.com/i/abc").await.unwrap() {
        PayProResolution::SelectCurrency { options, funded } => {
            assert_eq!(funded.get("btc"), Some(&2));
            assert_eq!(funded.get("eth"), Some(&1));
            assert_eq!(funded.get("doge"), None);
            let doge = options
                .payment_options
                .iter()
                .find(|o| o.currency == "DOGE")
                .unwrap();
            assert!(doge.disabled);
        }
        other => panic!("expected SelectCurrency, got {other:?}"),
    }
}

#[tokio::test]
async fn test_xrp_invoice_id_propagates() {
    let options = PayProOptions {
        payment_options: vec![option("XRP", 5_000_000, true)],
        ..Default::default()
    };
    let mut details = details("rXrpAddr", Some(12.0));
    details.instructions[0].outputs[0].invoice_id = Some("ABCDEF".to_string());
    let resolver = resolver(options, details, &[]);
    match resolver.resolve("https://roth.com/i/abc").await.unwrap() {
        PayProResolution::Confirm(params) => {
            assert_eq!(params.coin, Coin::Xrp);
            assert_eq!(params.invoice_id.as_deref(), Some("ABCDEF"));
            assert_eq!(params.required_fee_rate, Some(12.0));
        }
        other => panic!("expected Confirm, got {other:?}"),
    }
}

#[tokio::test]
async fn test_coin_hint_skips_selection() {
    let options = PayProOptions {
        payment_options: vec![option("BTC", 1000, false), option("ETH", 2000, false)],
        ..Default::default()
    };
    let resolver = resolver(options, details("1BtcAddr", None), &[]);
    match resolver
        .resolve_for_coin("https://roth.com/i/abc", Coin::Btc)
        .await
        .unwrap()
    {
        PayProResolution::Confirm(params) => assert_eq!(params.coin, Coin::Btc),
        other => panic!("expected Confirm, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_options_error() {
    let resolver = resolver(PayProOptions::default(), details("addr", None), &[]);
    let err = resolver.resolve("https://roth.com/i/abc").await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)));
}
