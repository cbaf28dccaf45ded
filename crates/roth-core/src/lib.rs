//! roth wallet core: incoming-data classification and redirect dispatch
//!
//! This crate turns arbitrary incoming strings (QR scans, clipboard
//! contents, deep links) into a single strongly typed [`ClassifiedIntent`],
//! then maps each intent to exactly one [`Outcome`] via the dispatcher.
//! Classification is a pure function of the input string; everything that
//! depends on app state (active page, preselected amounts, feature flags)
//! lives in the dispatch step's explicit [`RedirectContext`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amount;
pub mod chain;
pub mod classify;
pub mod dispatch;
pub mod error;
pub mod intent;
pub mod uri;
pub mod wallet_card;

pub use classify::{Classifier, ClassifierConfig};
pub use dispatch::{
    ActivePage, Dispatcher, MenuKind, MenuRequest, NavigationInstruction, Outcome, ParamValue,
    RedirectContext,
};
pub use error::{Error, Result};
pub use intent::{ClassifiedIntent, ParsedData, SendPayload};
