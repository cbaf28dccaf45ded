//! Parsing of the reserved `wallet-card/<event>?<payload>` path

use crate::intent::{CardPairing, WalletCardEvent};
use crate::{Error, Result};

/// Parse the portion of an input string following `wallet-card/` into a
/// secondary event. The `pairing` event requires a `secret` in its payload.
pub fn parse_wallet_card(data: &str) -> Result<WalletCardEvent> {
    let event = data
        .split_once("wallet-card/")
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let (name, payload) = match event.split_once('?') {
        Some((name, payload)) => (name, payload),
        None => (event, ""),
    };

    match name {
        "pairing" => {
            // first key=value pair carries the secret
            let secret = payload
                .split_once('=')
                .map(|(_, rest)| rest.split('&').next().unwrap_or_default())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::InvalidPayload("pairing event without secret".to_string()))?;
            let code = payload
                .split_once("&code=")
                .map(|(_, rest)| rest.to_string())
                .filter(|c| !c.is_empty());
            Ok(WalletCardEvent::Pairing(CardPairing {
                secret: secret.to_string(),
                code,
                dashboard_redirect: payload.contains("dashboardRedirect"),
                order_complete: payload.contains("fb=orderComplete"),
            }))
        }
        "order-now" => Ok(WalletCardEvent::OrderNow),
        "email-verified" => Ok(WalletCardEvent::EmailVerified),
        "get-started" => Ok(WalletCardEvent::GetStarted),
        "retry" => Ok(WalletCardEvent::Retry),
        "debit-card-order" => Ok(WalletCardEvent::DebitCardOrder),
        other => Ok(WalletCardEvent::Unknown(other.to_string())),
    }
}
