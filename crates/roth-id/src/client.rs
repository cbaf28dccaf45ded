//! Signed API client
//!
//! Three request shapes exist against the account API:
//!
//! * `get` — unsigned, plain JSON GET.
//! * `post` — signs `api_url + endpoint + json(body)` and sends the
//!   signature in `x-signature` with the identity key in `x-identity`.
//! * `post_auth` — the token-creation shape: the signature and public key
//!   are embedded in the params themselves, which travel as a JSON string
//!   inside the envelope.
//! * `api_call` — the token-bound RPC shape: the token is appended to the
//!   URL and included in the canonical string `url + token + json(envelope)`.

use crate::identity::{Identity, IdentityProvider};
use crate::transport::ApiTransport;
use crate::{signing, Error, Result};
use roth_params::{Network, NetworkType};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Client issuing signed requests against one network's account API
#[derive(Clone)]
pub struct SigningClient {
    network: Network,
    transport: Arc<dyn ApiTransport>,
    identities: Arc<dyn IdentityProvider>,
}

impl SigningClient {
    /// New client for the given network
    pub fn new(
        network: NetworkType,
        transport: Arc<dyn ApiTransport>,
        identities: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            network: Network::from_type(network),
            transport,
            identities,
        }
    }

    /// The network this client talks to
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The app identity used for signing on this network
    pub async fn identity(&self) -> Result<Identity> {
        self.identities.identity(self.network.network_type).await
    }

    /// Unsigned GET against an API endpoint (leading slash included)
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.network.api_url, endpoint);
        self.transport.get_json(&url).await
    }

    /// Fetch a roth invoice by id
    pub async fn fetch_invoice(&self, invoice_id: &str) -> Result<Value> {
        let response = self.get(&format!("/invoices/{invoice_id}")).await?;
        Ok(response.get("data").cloned().unwrap_or(response))
    }

    /// Signed POST against an API endpoint. The canonical string is
    /// `api_url + endpoint + json(body)`.
    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        let identity = self.identity().await?;
        let data_to_sign = format!(
            "{}{}{}",
            self.network.api_url,
            endpoint,
            serde_json::to_string(body)?
        );
        let signature = identity.sign(&data_to_sign)?;
        let headers = [
            ("x-identity".to_string(), identity.public_key_hex()),
            ("x-signature".to_string(), signature),
        ];
        let url = format!("{}{}", self.network.api_url, endpoint);
        self.transport.post_json(&url, body, &headers).await
    }

    /// Token-creation POST. Signs the JSON of `params` alone, embeds the
    /// signature and public key into the params, and sends them stringified
    /// inside the method envelope. Returns the response together with the
    /// identity used, which the caller needs for follow-up calls.
    pub async fn post_auth(&self, method: &str, params: Value) -> Result<(Value, Identity)> {
        let identity = self.identity().await?;
        let data_to_sign = serde_json::to_string(&params)?;
        let signature = identity.sign(&data_to_sign)?;
        if !signing::verify(&data_to_sign, &identity.public_key_hex(), &signature)? {
            return Err(Error::Signing("self-verification failed".to_string()));
        }

        let mut params = params;
        let object = params
            .as_object_mut()
            .ok_or_else(|| Error::Api("params must be a JSON object".to_string()))?;
        object.insert("signature".to_string(), json!(signature));
        object.insert("pubkey".to_string(), json!(identity.public_key_hex()));

        let envelope = json!({
            "method": method,
            "params": serde_json::to_string(&params)?,
        });
        debug!(method, "posting auth request");
        let response = self
            .transport
            .post_json(&self.network.api_root(), &envelope, &[])
            .await?;
        Ok((response, identity))
    }

    /// Token-bound RPC call. The canonical string covers the full URL with
    /// the token appended plus the JSON envelope; application-level errors
    /// surface as [`Error::Api`] and the `data` field is unwrapped.
    pub async fn api_call(&self, method: &str, params: Value, token: &str) -> Result<Value> {
        let root = self.network.api_root();
        let envelope = json!({
            "method": method,
            "params": serde_json::to_string(&params)?,
            "token": token,
        });
        let data_to_sign = format!("{root}{token}{}", serde_json::to_string(&envelope)?);
        let identity = self.identity().await?;
        let signature = identity.sign(&data_to_sign)?;
        let headers = [
            ("x-identity".to_string(), identity.public_key_hex()),
            ("x-signature".to_string(), signature),
        ];
        let response = self
            .transport
            .post_json(&format!("{root}{token}"), &envelope, &headers)
            .await?;
        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
            return Err(Error::Api(message));
        }
        Ok(response.get("data").cloned().unwrap_or(response))
    }
}
