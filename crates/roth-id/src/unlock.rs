//! Invoice unlock flow
//!
//! Unlocking checks the pairing token, exchanges it for the user-shopper
//! product token, then asks the server whether the account tier clears the
//! invoice. Every early exit is a distinct outcome, not an error; callers
//! route each one differently (pairing sheet, support sheet, resolver).

use crate::account::AccountManager;
use crate::{Error, Result};
use serde_json::{json, Value};
use tracing::debug;

/// Parsed unlock input
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockRequest {
    /// Invoice URL to resolve after a successful unlock
    pub invoice_url: String,
    /// Invoice id extracted from the URL
    pub invoice_id: String,
}

/// Extract the invoice URL and id from a raw unlock input string of the
/// form `<marker>?<invoice-url>` where the URL contains an `i/<id>` path
pub fn parse_unlock_input(data: &str) -> Result<UnlockRequest> {
    let invoice_url = data
        .split_once('?')
        .map(|(_, rest)| rest.to_string())
        .ok_or_else(|| Error::Protocol("unlock input without invoice URL".to_string()))?;
    let invoice_id = invoice_url
        .split_once("i/")
        .map(|(_, id)| id.to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::Protocol("unlock input without invoice id".to_string()))?;
    Ok(UnlockRequest {
        invoice_url,
        invoice_id,
    })
}

/// Result of an unlock attempt
#[derive(Debug, Clone, PartialEq)]
pub enum UnlockOutcome {
    /// Unlocked; resolve the invoice URL next
    Success {
        /// Invoice URL to resolve
        invoice_url: String,
    },
    /// No pairing token stored; the account must pair first
    PairingRequired,
    /// The account has no user-shopper product token
    UserShopperNotFound,
    /// The account tier does not clear this invoice
    TierNotMet,
}

impl AccountManager {
    /// Attempt to unlock an invoice for the paired account
    pub async fn unlock(&self, request: &UnlockRequest) -> Result<UnlockOutcome> {
        let network = self.client().network().network_type;
        let token = match self.store().pairing_token(network).await? {
            Some(token) => token,
            None => return Ok(UnlockOutcome::PairingRequired),
        };

        let tokens = self
            .client()
            .api_call("getProductTokens", json!({}), &token)
            .await?;
        let shopper_token = tokens
            .as_array()
            .into_iter()
            .flatten()
            .find(|t| t.get("facade").and_then(Value::as_str) == Some("userShopper"))
            .and_then(|t| t.get("token").and_then(Value::as_str))
            .map(str::to_string);
        let shopper_token = match shopper_token {
            Some(token) => token,
            None => return Ok(UnlockOutcome::UserShopperNotFound),
        };

        debug!(invoice_id = %request.invoice_id, "unlocking invoice");
        let response = self
            .client()
            .api_call(
                "unlockInvoice",
                json!({ "invoiceId": request.invoice_id }),
                &shopper_token,
            )
            .await?;
        let meets_tier = response
            .get("meetsRequiredTier")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !meets_tier {
            return Ok(UnlockOutcome::TierNotMet);
        }
        Ok(UnlockOutcome::Success {
            invoice_url: request.invoice_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unlock_input() {
        let request = parse_unlock_input("https://link.test/unlock?https://roth.com/i/abc").unwrap();
        assert_eq!(request.invoice_url, "https://roth.com/i/abc");
        assert_eq!(request.invoice_id, "abc");
    }

    #[test]
    fn test_parse_unlock_input_rejects_malformed() {
        assert!(parse_unlock_input("no question mark").is_err());
        assert!(parse_unlock_input("unlock?https://roth.com/about").is_err());
        assert!(parse_unlock_input("unlock?https://roth.com/i/").is_err());
    }
}
