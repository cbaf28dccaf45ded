//! Account pairing and lifecycle
//!
//! Pairing walks a small state machine:
//!
//! ```text
//! Unpaired -> AwaitingOtp -> Pairing -> PairedPendingConfirm -> Paired
//!                 (otp)                      (user confirm)
//! Paired -> Disconnected
//! ```
//!
//! The OTP step only appears when the pairing data demands two-factor.
//! Any server failure during `Pairing` falls back to `Unpaired` with
//! nothing persisted; only an explicit confirm writes the token, user
//! info and account record. A second pair attempt while one is in flight
//! is an immediate caller error, never queued.

use crate::client::SigningClient;
use crate::store::{Account, AccountStore};
use crate::{Error, Result};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Message posted to the embedded card surface after a disconnect
pub const DISCONNECT_NOTICE: &str = "rothIdDisconnected";

/// Pairing lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingState {
    /// No pairing, none in progress
    Unpaired,
    /// Waiting for the user's two-factor code
    AwaitingOtp,
    /// Token creation in flight
    Pairing,
    /// Token obtained, waiting for the user to confirm the account
    PairedPendingConfirm,
    /// Account persisted
    Paired,
    /// Previously paired, now disconnected
    Disconnected,
}

/// Input to the pairing flow, carried by a pairing deep link
#[derive(Debug, Clone)]
pub struct PairData {
    /// Shared pairing secret issued by the server
    pub secret: String,
    /// Email of the account being paired
    pub email: String,
    /// Whether the account demands a two-factor code
    pub otp: bool,
}

/// Pairing result awaiting user confirmation
#[derive(Debug, Clone)]
pub struct PendingPairing {
    /// API token created for this pairing
    pub token: String,
    /// Account email
    pub email: String,
    /// Given name reported by the server
    pub given_name: String,
    /// Family name reported by the server
    pub family_name: String,
    /// Full basic-info document
    pub user_info: Value,
}

/// Outcome of one step of the pairing flow
#[derive(Debug, Clone)]
pub enum PairStep {
    /// Two-factor code required; call `submit_otp` to continue
    OtpRequired,
    /// Token created and user info fetched; confirm or decline
    Pending(PendingPairing),
}

/// A stored account bundled with the context needed for API calls
#[derive(Debug, Clone)]
pub struct AccountContext {
    /// The stored account
    pub account: Account,
    /// Identity public key for this network, never persisted with the account
    pub identity_key: String,
}

struct StateInner {
    state: PairingState,
    pair_data: Option<PairData>,
    pending: Option<PendingPairing>,
}

/// Manages pairing and paired accounts for one network
pub struct AccountManager {
    client: SigningClient,
    store: Arc<dyn AccountStore>,
    device_name: String,
    state: Mutex<StateInner>,
}

impl AccountManager {
    /// New manager over a signing client and store
    pub fn new(client: SigningClient, store: Arc<dyn AccountStore>, device_name: &str) -> Self {
        Self {
            client,
            store,
            device_name: device_name.to_string(),
            state: Mutex::new(StateInner {
                state: PairingState::Unpaired,
                pair_data: None,
                pending: None,
            }),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PairingState {
        self.state.lock().state
    }

    /// The signing client this manager uses
    pub fn client(&self) -> &SigningClient {
        &self.client
    }

    pub(crate) fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Begin pairing. Returns `OtpRequired` when the pairing data demands
    /// two-factor, otherwise proceeds straight to token creation. Rejected
    /// immediately if a pairing is already in flight.
    pub async fn pair(&self, pair_data: PairData) -> Result<PairStep> {
        {
            let mut inner = self.state.lock();
            match inner.state {
                PairingState::AwaitingOtp
                | PairingState::Pairing
                | PairingState::PairedPendingConfirm => {
                    return Err(Error::State("pairing already in progress".to_string()));
                }
                _ => {}
            }
            if pair_data.otp {
                inner.state = PairingState::AwaitingOtp;
                inner.pair_data = Some(pair_data);
                return Ok(PairStep::OtpRequired);
            }
            inner.state = PairingState::Pairing;
            inner.pair_data = Some(pair_data);
        }
        self.create_token(None).await
    }

    /// Continue an OTP-gated pairing with the user's code
    pub async fn submit_otp(&self, code: &str) -> Result<PairStep> {
        {
            let mut inner = self.state.lock();
            if inner.state != PairingState::AwaitingOtp {
                return Err(Error::State("no pairing awaiting a code".to_string()));
            }
            inner.state = PairingState::Pairing;
        }
        self.create_token(Some(code)).await
    }

    async fn create_token(&self, code: Option<&str>) -> Result<PairStep> {
        let pair_data = self
            .state
            .lock()
            .pair_data
            .clone()
            .ok_or_else(|| Error::State("no pairing data".to_string()))?;

        match self.try_create_token(&pair_data, code).await {
            Ok(pending) => {
                let mut inner = self.state.lock();
                inner.state = PairingState::PairedPendingConfirm;
                inner.pending = Some(pending.clone());
                info!("token created, awaiting account confirmation");
                Ok(PairStep::Pending(pending))
            }
            Err(err) => {
                // nothing was persisted; drop back to the starting state
                let mut inner = self.state.lock();
                inner.state = PairingState::Unpaired;
                inner.pair_data = None;
                inner.pending = None;
                warn!(%err, "pairing failed");
                Err(err)
            }
        }
    }

    async fn try_create_token(
        &self,
        pair_data: &PairData,
        code: Option<&str>,
    ) -> Result<PendingPairing> {
        let mut params = json!({
            "secret": pair_data.secret,
            "version": 2,
            "deviceName": self.device_name,
        });
        if let Some(code) = code {
            params["code"] = json!(code);
        }

        let (response, _identity) = self.client.post_auth("createToken", params).await?;
        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(Error::Pairing(message));
        }
        let token = response
            .get("data")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Pairing("token missing from response".to_string()))?
            .to_string();
        debug!("create token: success");

        let user_info = self.client.api_call("getBasicInfo", json!({}), &token).await?;
        let field = |name: &str| {
            user_info
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Ok(PendingPairing {
            token,
            email: pair_data.email.clone(),
            given_name: field("givenName"),
            family_name: field("familyName"),
            user_info,
        })
    }

    /// Confirm a pending pairing: persist the token, user info and account
    /// record, then move to `Paired`
    pub async fn confirm(&self) -> Result<Account> {
        let pending = {
            let inner = self.state.lock();
            if inner.state != PairingState::PairedPendingConfirm {
                return Err(Error::State("no pairing awaiting confirmation".to_string()));
            }
            inner
                .pending
                .clone()
                .ok_or_else(|| Error::State("pending pairing lost".to_string()))?
        };

        let network = self.client.network().network_type;
        let account = Account {
            email: pending.email.clone(),
            token: pending.token.clone(),
            given_name: pending.given_name.clone(),
            family_name: pending.family_name.clone(),
        };
        self.store.set_pairing_token(network, &pending.token).await?;
        self.store.set_user_info(network, &pending.user_info).await?;
        self.store.upsert_account(network, &account).await?;

        let mut inner = self.state.lock();
        inner.state = PairingState::Paired;
        inner.pair_data = None;
        inner.pending = None;
        info!(email = %account.email, "account paired");
        Ok(account)
    }

    /// Decline a pending pairing; nothing is persisted
    pub fn decline(&self) -> Result<()> {
        let mut inner = self.state.lock();
        if inner.state != PairingState::PairedPendingConfirm {
            return Err(Error::State("no pairing awaiting confirmation".to_string()));
        }
        inner.state = PairingState::Unpaired;
        inner.pair_data = None;
        inner.pending = None;
        info!("pairing declined");
        Ok(())
    }

    /// Disconnect: purge the pairing token, user info and all accounts for
    /// this network. Returns the notice to relay to the card surface.
    pub async fn disconnect(&self) -> Result<&'static str> {
        let network = self.client.network().network_type;
        self.store.remove_pairing_token(network).await?;
        self.store.remove_user_info(network).await?;
        self.store.clear_accounts(network).await?;
        self.state.lock().state = PairingState::Disconnected;
        info!("account disconnected");
        Ok(DISCONNECT_NOTICE)
    }

    /// Accounts exactly as persisted
    pub async fn accounts_as_stored(&self) -> Result<Vec<Account>> {
        self.store
            .accounts(self.client.network().network_type)
            .await
    }

    /// Accounts bundled with a fresh identity key. The identity comes from
    /// the provider on every call and is never written to the store.
    pub async fn accounts(&self) -> Result<Vec<AccountContext>> {
        let stored = self.accounts_as_stored().await?;
        if stored.is_empty() {
            return Ok(Vec::new());
        }
        let identity = self.client.identity().await?;
        Ok(stored
            .into_iter()
            .map(|account| AccountContext {
                account,
                identity_key: identity.public_key_hex(),
            })
            .collect())
    }

    /// Remove one stored account by email
    pub async fn remove_account(&self, email: &str) -> Result<()> {
        self.store
            .remove_account(self.client.network().network_type, email)
            .await
    }

    /// Re-fetch basic info with the stored pairing token and persist it
    pub async fn refresh_user_info(&self) -> Result<Value> {
        let network = self.client.network().network_type;
        let token = self
            .store
            .pairing_token(network)
            .await?
            .ok_or_else(|| Error::State("not paired".to_string()))?;
        debug!("refreshing user info");
        let user_info = self.client.api_call("getBasicInfo", json!({}), &token).await?;
        self.store.set_user_info(network, &user_info).await?;
        Ok(user_info)
    }
}
