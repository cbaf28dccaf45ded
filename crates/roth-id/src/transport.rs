//! HTTP transport abstraction
//!
//! The signing client talks JSON over a small trait so tests can stub the
//! wire; the production implementation wraps `reqwest`.

use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// JSON transport used by the signing client
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GET a JSON document
    async fn get_json(&self, url: &str) -> Result<Value>;

    /// POST a JSON body with extra headers, returning the JSON response
    async fn post_json(&self, url: &str, body: &Value, headers: &[(String, String)])
        -> Result<Value>;
}

/// Production transport over reqwest
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with a 30 second request timeout
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }

    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value> {
        let mut request = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(body);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }
}
