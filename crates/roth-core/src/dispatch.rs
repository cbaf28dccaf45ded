//! Redirect dispatch: classified intent to a single navigation instruction
//! or side effect
//!
//! The dispatcher is a pure function of the intent plus an explicit
//! `RedirectContext`; exactly one `Outcome` is produced per call. UI wiring
//! subscribes to the returned value, there is no shared event channel.

use crate::intent::{CardPairing, ClassifiedIntent, SendPayload, WalletCardEvent};
use roth_params::Coin;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Wyre support request URL surfaced on an error redirect
pub const WYRE_SUPPORT_URL: &str = "https://wyre-support.zendesk.com/hc/en-us/requests/new";

/// A parameter value carried by a navigation instruction
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String parameter
    Str(String),
    /// Integer parameter (minor-unit amounts)
    Num(u128),
    /// Floating-point parameter (fee rates)
    Float(f64),
    /// Boolean parameter
    Bool(bool),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<u128> for ParamValue {
    fn from(value: u128) -> Self {
        ParamValue::Num(value)
    }
}

/// The single externally visible output of classification + dispatch for
/// navigating intents: a named view and its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationInstruction {
    /// Target view name
    pub view: &'static str,
    /// View parameters
    pub params: BTreeMap<&'static str, ParamValue>,
}

impl NavigationInstruction {
    /// Instruction with no parameters
    pub fn new(view: &'static str) -> Self {
        Self {
            view,
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter
    pub fn with(mut self, key: &'static str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value.into());
        self
    }

    /// Add a parameter if the value is present
    pub fn with_opt(mut self, key: &'static str, value: Option<impl Into<ParamValue>>) -> Self {
        if let Some(value) = value {
            self.params.insert(key, value.into());
        }
        self
    }
}

/// Page the input originated from, when the caller knows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePage {
    /// The QR scanner
    Scan,
    /// The send flow
    Send,
}

/// Explicit dispatch context, replacing the original's ambient active-page
/// state
#[derive(Debug, Clone, Default)]
pub struct RedirectContext {
    /// Page the input came from
    pub active_page: Option<ActivePage>,
    /// Pre-entered amount in minor units, used when the input carries none
    pub default_amount: Option<u128>,
    /// Coin preselected by the caller
    pub coin: Option<Coin>,
    /// Whether the input originated from the home card
    pub from_home_card: bool,
}

/// Kind of action menu to present for ambiguous scanner input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Swept private key
    PrivateKey,
    /// Bitcoin-style address (also used for Bitcoin Cash)
    BitcoinAddress,
    /// Ethereum address
    EthereumAddress,
    /// Ripple address
    RippleAddress,
    /// Dogecoin address
    DogecoinAddress,
    /// Opaque scanned text
    Text,
}

/// Request to present an action menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRequest {
    /// Menu kind
    pub kind: MenuKind,
    /// The raw input the menu acts on
    pub data: String,
    /// Coin associated with the input, when known
    pub coin: Option<Coin>,
    /// Whether the input originated from the home card
    pub from_home_card: bool,
}

/// Action relayed to the embedded card surface
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    /// Start card pairing with the given parameters
    Pairing(CardPairing),
    /// Relay a message to the card web view
    Message {
        /// Message name
        message: &'static str,
        /// Also enable the card experiment flag
        enable_experiment: bool,
    },
    /// Enable the card experiment flag only
    EnableExperiment,
}

/// The result of dispatching one classified intent
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Navigate to a view
    Navigate(NavigationInstruction),
    /// Present an action menu
    ShowMenu(MenuRequest),
    /// Resolve a payment-protocol URL (async, see the resolver)
    ResolvePayPro {
        /// Payment-protocol URL
        url: String,
        /// Coin hint from the originating URI
        coin: Option<Coin>,
    },
    /// Run the invoice unlock flow
    UnlockInvoice {
        /// Raw unlock input
        raw: String,
    },
    /// Feed the embedded data back through classification
    Redirect {
        /// The embedded input string
        data: String,
    },
    /// Surface the Wyre error sheet, offering the support URL
    WyreError {
        /// Support request URL
        support_url: &'static str,
    },
    /// Relay an action to the embedded card surface
    Card(CardAction),
    /// Persist a dynamic link for later handling
    StoreDynamicLink {
        /// The extracted deep link
        deep_link: String,
    },
    /// Acknowledged, nothing to do
    Ignored {
        /// Why the input was dropped
        reason: &'static str,
    },
}

/// Dispatcher configuration: which optional surfaces this build enables
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// WalletConnect extension enabled
    pub wallet_connect_enabled: bool,
    /// Debit card extension enabled
    pub debit_card_enabled: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            wallet_connect_enabled: true,
            debit_card_enabled: true,
        }
    }
}

impl Dispatcher {
    /// Compute the single outcome for a classified intent
    pub fn dispatch(&self, intent: ClassifiedIntent, ctx: &RedirectContext) -> Outcome {
        match intent {
            ClassifiedIntent::InvoiceUrl { url } => Outcome::ResolvePayPro { url, coin: None },
            ClassifiedIntent::InvoiceUnlock { raw } => Outcome::UnlockInvoice { raw },
            ClassifiedIntent::PayPro { url, coin } => Outcome::ResolvePayPro { url, coin },
            ClassifiedIntent::BitcoinUri(p)
            | ClassifiedIntent::BitcoinCashUri(p)
            | ClassifiedIntent::DogecoinUri(p)
            | ClassifiedIntent::RothUri(p) => self.send_outcome(p, ctx),
            // address-style fallback when no amount: scanner gets a menu
            ClassifiedIntent::EthereumUri(p) => self.uri_or_address_outcome(p, ctx),
            ClassifiedIntent::RippleUri(p) => self.uri_or_address_outcome(p, ctx),
            ClassifiedIntent::WalletConnectUri { uri } => {
                if !self.wallet_connect_enabled {
                    warn!("WalletConnect is disabled for this build");
                    return Outcome::Ignored {
                        reason: "WalletConnect disabled",
                    };
                }
                Outcome::Navigate(NavigationInstruction::new("WalletConnectPage").with("uri", uri))
            }
            ClassifiedIntent::PlainUrl { .. } => {
                debug!("plain URLs are no longer processed");
                Outcome::Ignored {
                    reason: "plain URL",
                }
            }
            ClassifiedIntent::PlainAddress { coin, address } => {
                self.address_outcome(coin, address, ctx)
            }
            ClassifiedIntent::CoinbaseRedirect { code } => Outcome::Navigate(
                NavigationInstruction::new("CoinbasePage").with_opt("code", code),
            ),
            ClassifiedIntent::SimplexRedirect(p) => Outcome::Navigate(
                NavigationInstruction::new("SimplexPage")
                    .with_opt("success", p.success)
                    .with_opt("paymentId", p.payment_id)
                    .with_opt("quoteId", p.quote_id)
                    .with_opt("userId", p.user_id),
            ),
            ClassifiedIntent::WyreRedirect(Some(order)) => Outcome::Navigate(
                NavigationInstruction::new("WyrePage")
                    .with("orderId", order.order_id)
                    .with_opt("transferId", order.transfer_id)
                    .with_opt("walletId", order.wallet_id)
                    .with_opt("owner", order.owner)
                    .with_opt("accountId", order.account_id)
                    .with_opt("dest", order.dest)
                    .with_opt("destAmount", order.dest_amount)
                    .with_opt("destCurrency", order.dest_currency)
                    .with_opt("purchaseAmount", order.purchase_amount)
                    .with_opt("sourceAmount", order.source_amount)
                    .with_opt("sourceCurrency", order.source_currency)
                    .with_opt("status", order.status)
                    .with_opt("createdAt", order.created_at)
                    .with_opt("paymentMethodName", order.payment_method_name)
                    .with_opt("blockchainNetworkTx", order.blockchain_network_tx),
            ),
            ClassifiedIntent::WyreRedirect(None) => Outcome::Ignored {
                reason: "wyre redirect without order",
            },
            ClassifiedIntent::WyreError => Outcome::WyreError {
                support_url: WYRE_SUPPORT_URL,
            },
            ClassifiedIntent::InvoiceIntent { url: Some(url) } => Outcome::Redirect { data: url },
            ClassifiedIntent::InvoiceIntent { url: None } => Outcome::Ignored {
                reason: "invoice intent without url",
            },
            ClassifiedIntent::CardRedirLink { .. } => {
                if !self.debit_card_enabled {
                    warn!("debit card is disabled for this build");
                    return Outcome::Ignored {
                        reason: "debit card disabled",
                    };
                }
                Outcome::Navigate(NavigationInstruction::new("PhaseOneCardIntro"))
            }
            ClassifiedIntent::CardUri { .. } => Outcome::Ignored {
                reason: "superseded card pairing path",
            },
            ClassifiedIntent::JoinCode { code } => {
                Outcome::Navigate(NavigationInstruction::new("JoinWalletPage").with("url", code))
            }
            ClassifiedIntent::PrivateKey { key } => Outcome::ShowMenu(MenuRequest {
                kind: MenuKind::PrivateKey,
                data: key,
                coin: None,
                from_home_card: ctx.from_home_card,
            }),
            ClassifiedIntent::ImportPrivateKey { code } => Outcome::Navigate(
                NavigationInstruction::new("ImportWalletPage").with("code", code),
            ),
            ClassifiedIntent::WalletCard(event) => Self::card_outcome(event),
            ClassifiedIntent::DynamicLink {
                deep_link: Some(deep_link),
            } => Outcome::StoreDynamicLink { deep_link },
            ClassifiedIntent::DynamicLink { deep_link: None } => Outcome::Ignored {
                reason: "dynamic link without deep link id",
            },
            ClassifiedIntent::Unrecognized { raw } => {
                if ctx.active_page == Some(ActivePage::Scan) {
                    debug!("unrecognized scan treated as plain text");
                    Outcome::ShowMenu(MenuRequest {
                        kind: MenuKind::Text,
                        data: raw,
                        coin: None,
                        from_home_card: ctx.from_home_card,
                    })
                } else {
                    warn!("unknown incoming data");
                    Outcome::Ignored {
                        reason: "unrecognized input",
                    }
                }
            }
        }
    }

    fn send_outcome(&self, p: SendPayload, ctx: &RedirectContext) -> Outcome {
        if let Some(url) = p.paypro {
            return Outcome::ResolvePayPro {
                url,
                coin: Some(p.coin),
            };
        }
        match p.amount.or(ctx.default_amount) {
            Some(amount) => Outcome::Navigate(Self::confirm_page(
                p.coin,
                p.address,
                amount,
                p.message,
                p.required_fee,
                p.destination_tag,
            )),
            None => Outcome::Navigate(Self::amount_page(p.coin, p.address)),
        }
    }

    fn uri_or_address_outcome(&self, p: SendPayload, ctx: &RedirectContext) -> Outcome {
        match p.amount.or(ctx.default_amount) {
            Some(amount) => Outcome::Navigate(Self::confirm_page(
                p.coin,
                p.address,
                amount,
                p.message,
                p.required_fee,
                p.destination_tag,
            )),
            None => self.address_outcome(p.coin, p.address, ctx),
        }
    }

    fn address_outcome(&self, coin: Coin, address: String, ctx: &RedirectContext) -> Outcome {
        if ctx.active_page == Some(ActivePage::Scan) {
            let kind = match coin {
                Coin::Btc | Coin::Bch => MenuKind::BitcoinAddress,
                Coin::Eth => MenuKind::EthereumAddress,
                Coin::Xrp => MenuKind::RippleAddress,
                Coin::Doge => MenuKind::DogecoinAddress,
            };
            return Outcome::ShowMenu(MenuRequest {
                kind,
                data: address,
                coin: Some(coin),
                from_home_card: ctx.from_home_card,
            });
        }
        match ctx.default_amount {
            Some(amount) => {
                Outcome::Navigate(Self::confirm_page(coin, address, amount, None, None, None))
            }
            None => Outcome::Navigate(Self::amount_page(coin, address)),
        }
    }

    fn confirm_page(
        coin: Coin,
        address: String,
        amount: u128,
        message: Option<String>,
        required_fee: Option<f64>,
        destination_tag: Option<String>,
    ) -> NavigationInstruction {
        NavigationInstruction::new("ConfirmPage")
            .with("coin", coin.ticker())
            .with("toAddress", address)
            .with("amount", amount)
            .with_opt("description", message)
            .with_opt("requiredFeeRate", required_fee.map(ParamValue::Float))
            .with_opt("destinationTag", destination_tag)
    }

    fn amount_page(coin: Coin, address: String) -> NavigationInstruction {
        NavigationInstruction::new("AmountPage")
            .with("coin", coin.ticker())
            .with("toAddress", address)
    }

    fn card_outcome(event: WalletCardEvent) -> Outcome {
        match event {
            WalletCardEvent::Pairing(p) => Outcome::Card(CardAction::Pairing(p)),
            WalletCardEvent::OrderNow => Outcome::Card(CardAction::EnableExperiment),
            WalletCardEvent::EmailVerified => Outcome::Card(CardAction::Message {
                message: "emailVerified",
                enable_experiment: false,
            }),
            WalletCardEvent::GetStarted => Outcome::Card(CardAction::Message {
                message: "orderCard",
                enable_experiment: false,
            }),
            WalletCardEvent::Retry => Outcome::Card(CardAction::Message {
                message: "retry",
                enable_experiment: false,
            }),
            WalletCardEvent::DebitCardOrder => Outcome::Card(CardAction::Message {
                message: "debitCardOrder",
                enable_experiment: true,
            }),
            WalletCardEvent::Unknown(_) => Outcome::Ignored {
                reason: "unknown wallet-card event",
            },
        }
    }
}

/// Target view chosen from an action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    /// Add the value to the address book
    AddressbookAdd,
    /// Enter an amount for the value as recipient
    Amount,
    /// Sweep a paper wallet
    PaperWallet,
}

/// Build the navigation instruction for a dismissed action menu selection
pub fn finish_menu(target: MenuTarget, value: String, coin: Option<Coin>) -> NavigationInstruction {
    let coin = coin.unwrap_or(Coin::Btc);
    match target {
        MenuTarget::AddressbookAdd => NavigationInstruction::new("AddressbookAddPage")
            .with("addressbookEntry", value)
            .with("coin", coin.ticker()),
        MenuTarget::Amount => NavigationInstruction::new("AmountPage")
            .with("toAddress", value)
            .with("coin", coin.ticker()),
        MenuTarget::PaperWallet => NavigationInstruction::new("PaperWalletPage")
            .with("privateKey", value)
            .with("coin", coin.ticker()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;

    const BTC_ADDR: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    fn dispatch(data: &str, ctx: &RedirectContext) -> Outcome {
        Dispatcher::default().dispatch(Classifier::default().classify(data), ctx)
    }

    #[test]
    fn test_uri_with_amount_confirms() {
        let outcome = dispatch(
            &format!("bitcoin:{BTC_ADDR}?amount=0.5&message=lunch"),
            &RedirectContext::default(),
        );
        match outcome {
            Outcome::Navigate(nav) => {
                assert_eq!(nav.view, "ConfirmPage");
                assert_eq!(nav.params["amount"], ParamValue::Num(50_000_000));
                assert_eq!(nav.params["toAddress"], ParamValue::Str(BTC_ADDR.into()));
                assert_eq!(nav.params["description"], ParamValue::Str("lunch".into()));
            }
            other => panic!("expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_uri_without_amount_enters_amount() {
        let outcome = dispatch(&format!("bitcoin:{BTC_ADDR}"), &RedirectContext::default());
        match outcome {
            Outcome::Navigate(nav) => assert_eq!(nav.view, "AmountPage"),
            other => panic!("expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_paypro_pointer_supersedes_send() {
        let outcome = dispatch(
            &format!("bitcoin:{BTC_ADDR}?amount=1&r=https%3A%2F%2Fx.test%2Fi%2F1"),
            &RedirectContext::default(),
        );
        match outcome {
            Outcome::ResolvePayPro { url, coin } => {
                assert_eq!(url, "https://x.test/i/1");
                assert_eq!(coin, Some(Coin::Btc));
            }
            other => panic!("expected ResolvePayPro, got {other:?}"),
        }
    }

    #[test]
    fn test_scanner_address_shows_menu() {
        let ctx = RedirectContext {
            active_page: Some(ActivePage::Scan),
            ..Default::default()
        };
        let outcome = dispatch(BTC_ADDR, &ctx);
        match outcome {
            Outcome::ShowMenu(menu) => {
                assert_eq!(menu.kind, MenuKind::BitcoinAddress);
                assert_eq!(menu.coin, Some(Coin::Btc));
            }
            other => panic!("expected ShowMenu, got {other:?}"),
        }
    }

    #[test]
    fn test_address_with_default_amount() {
        let ctx = RedirectContext {
            default_amount: Some(1000),
            ..Default::default()
        };
        let outcome = dispatch(BTC_ADDR, &ctx);
        match outcome {
            Outcome::Navigate(nav) => {
                assert_eq!(nav.view, "ConfirmPage");
                assert_eq!(nav.params["amount"], ParamValue::Num(1000));
            }
            other => panic!("expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_ripple_uri_destination_tag() {
        let outcome = dispatch(
            "ripple:rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh?amount=1.5&dt=42",
            &RedirectContext::default(),
        );
        match outcome {
            Outcome::Navigate(nav) => {
                assert_eq!(nav.view, "ConfirmPage");
                assert_eq!(nav.params["amount"], ParamValue::Num(1_500_000));
                assert_eq!(nav.params["destinationTag"], ParamValue::Str("42".into()));
            }
            other => panic!("expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_ethereum_uri_without_amount_on_scanner() {
        let ctx = RedirectContext {
            active_page: Some(ActivePage::Scan),
            ..Default::default()
        };
        let outcome = dispatch("ethereum:0x52908400098527886E0F7030069857D2E4169EE7", &ctx);
        match outcome {
            Outcome::ShowMenu(menu) => assert_eq!(menu.kind, MenuKind::EthereumAddress),
            other => panic!("expected ShowMenu, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_text() {
        let scan_ctx = RedirectContext {
            active_page: Some(ActivePage::Scan),
            ..Default::default()
        };
        match dispatch("some random scan", &scan_ctx) {
            Outcome::ShowMenu(menu) => assert_eq!(menu.kind, MenuKind::Text),
            other => panic!("expected ShowMenu, got {other:?}"),
        }
        match dispatch("some random scan", &RedirectContext::default()) {
            Outcome::Ignored { .. } => {}
            other => panic!("expected Ignored, got {other:?}"),
        }
    }

    #[test]
    fn test_wallet_connect_gating() {
        let intent = Classifier::default().classify("wc:abc@1?bridge=x");
        let enabled = Dispatcher::default();
        assert!(matches!(
            enabled.dispatch(intent.clone(), &RedirectContext::default()),
            Outcome::Navigate(_)
        ));
        let disabled = Dispatcher {
            wallet_connect_enabled: false,
            ..Default::default()
        };
        assert!(matches!(
            disabled.dispatch(intent, &RedirectContext::default()),
            Outcome::Ignored { .. }
        ));
    }

    #[test]
    fn test_card_events() {
        let outcome = dispatch(
            "wallet-card/pairing?secret=s1&code=c1",
            &RedirectContext::default(),
        );
        match outcome {
            Outcome::Card(CardAction::Pairing(p)) => {
                assert_eq!(p.secret, "s1");
                assert_eq!(p.code.as_deref(), Some("c1"));
            }
            other => panic!("expected Card pairing, got {other:?}"),
        }
        let outcome = dispatch("wallet-card/debit-card-order", &RedirectContext::default());
        assert_eq!(
            outcome,
            Outcome::Card(CardAction::Message {
                message: "debitCardOrder",
                enable_experiment: true
            })
        );
    }

    #[test]
    fn test_invoice_intent_redirects() {
        let outcome = dispatch(
            "roth://invoice?url=https%3A%2F%2Froth.com%2Fi%2Fxyz",
            &RedirectContext::default(),
        );
        assert_eq!(
            outcome,
            Outcome::Redirect {
                data: "https://roth.com/i/xyz".to_string()
            }
        );
    }

    #[test]
    fn test_finish_menu() {
        let nav = finish_menu(MenuTarget::Amount, BTC_ADDR.to_string(), Some(Coin::Btc));
        assert_eq!(nav.view, "AmountPage");
        assert_eq!(nav.params["toAddress"], ParamValue::Str(BTC_ADDR.into()));
        let nav = finish_menu(MenuTarget::PaperWallet, "6Pkey".to_string(), None);
        assert_eq!(nav.view, "PaperWalletPage");
        assert_eq!(nav.params["coin"], ParamValue::Str("btc".into()));
    }
}
