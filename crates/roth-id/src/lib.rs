//! roth account, signing and payment-protocol services
//!
//! Covers everything that talks to the roth servers: the ECDSA-signed API
//! client, the account pairing state machine, invoice unlock, and
//! payment-protocol resolution. Network I/O hides behind small traits so
//! every flow tests against stubs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod client;
pub mod error;
pub mod identity;
pub mod paypro;
pub mod signing;
pub mod store;
pub mod transport;
pub mod unlock;

pub use account::{
    AccountContext, AccountManager, PairData, PairStep, PairingState, PendingPairing,
};
pub use client::SigningClient;
pub use error::{Error, Result};
pub use identity::{EphemeralIdentityProvider, Identity, IdentityProvider};
pub use paypro::{
    ConfirmParams, HttpPayProClient, PayProClient, PayProOptions, PayProResolution, PayProResolver,
    PaymentOption, WalletLookup,
};
pub use store::{Account, AccountStore, MemoryStore};
pub use transport::{ApiTransport, HttpTransport};
pub use unlock::{parse_unlock_input, UnlockOutcome, UnlockRequest};
