//! Persistence of pairing tokens, user info and accounts
//!
//! Storage is keyed by network so livenet and testnet pairings never mix.
//! The trait mirrors what the account manager needs; the in-memory
//! implementation backs tests and embedders that persist elsewhere.

use crate::{Error, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use roth_params::NetworkType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A paired account as persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account email, the account key
    pub email: String,
    /// API token obtained at pairing
    pub token: String,
    /// Given name, empty when the server omitted it
    #[serde(default, rename = "givenName")]
    pub given_name: String,
    /// Family name, empty when the server omitted it
    #[serde(default, rename = "familyName")]
    pub family_name: String,
}

/// Store for pairing state
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Stored pairing token for a network, if any
    async fn pairing_token(&self, network: NetworkType) -> Result<Option<String>>;
    /// Persist the pairing token
    async fn set_pairing_token(&self, network: NetworkType, token: &str) -> Result<()>;
    /// Remove the pairing token
    async fn remove_pairing_token(&self, network: NetworkType) -> Result<()>;

    /// Stored user info for a network, if any
    async fn user_info(&self, network: NetworkType) -> Result<Option<Value>>;
    /// Persist user info
    async fn set_user_info(&self, network: NetworkType, info: &Value) -> Result<()>;
    /// Remove user info
    async fn remove_user_info(&self, network: NetworkType) -> Result<()>;

    /// All stored accounts for a network
    async fn accounts(&self, network: NetworkType) -> Result<Vec<Account>>;
    /// Insert or replace an account, keyed by email
    async fn upsert_account(&self, network: NetworkType, account: &Account) -> Result<()>;
    /// Remove one account by email
    async fn remove_account(&self, network: NetworkType, email: &str) -> Result<()>;
    /// Remove every account for a network
    async fn clear_accounts(&self, network: NetworkType) -> Result<()>;
}

#[derive(Default)]
struct MemoryInner {
    tokens: HashMap<NetworkType, String>,
    user_info: HashMap<NetworkType, Value>,
    accounts: HashMap<NetworkType, HashMap<String, Account>>,
}

/// In-memory account store
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    /// New empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn pairing_token(&self, network: NetworkType) -> Result<Option<String>> {
        Ok(self.inner.lock().tokens.get(&network).cloned())
    }

    async fn set_pairing_token(&self, network: NetworkType, token: &str) -> Result<()> {
        self.inner.lock().tokens.insert(network, token.to_string());
        Ok(())
    }

    async fn remove_pairing_token(&self, network: NetworkType) -> Result<()> {
        self.inner.lock().tokens.remove(&network);
        Ok(())
    }

    async fn user_info(&self, network: NetworkType) -> Result<Option<Value>> {
        Ok(self.inner.lock().user_info.get(&network).cloned())
    }

    async fn set_user_info(&self, network: NetworkType, info: &Value) -> Result<()> {
        self.inner.lock().user_info.insert(network, info.clone());
        Ok(())
    }

    async fn remove_user_info(&self, network: NetworkType) -> Result<()> {
        self.inner.lock().user_info.remove(&network);
        Ok(())
    }

    async fn accounts(&self, network: NetworkType) -> Result<Vec<Account>> {
        let inner = self.inner.lock();
        let mut accounts: Vec<Account> = inner
            .accounts
            .get(&network)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        accounts.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(accounts)
    }

    async fn upsert_account(&self, network: NetworkType, account: &Account) -> Result<()> {
        if account.email.is_empty() {
            return Err(Error::Storage("account without email".to_string()));
        }
        self.inner
            .lock()
            .accounts
            .entry(network)
            .or_default()
            .insert(account.email.clone(), account.clone());
        Ok(())
    }

    async fn remove_account(&self, network: NetworkType, email: &str) -> Result<()> {
        if let Some(accounts) = self.inner.lock().accounts.get_mut(&network) {
            accounts.remove(email);
        }
        Ok(())
    }

    async fn clear_accounts(&self, network: NetworkType) -> Result<()> {
        self.inner.lock().accounts.remove(&network);
        Ok(())
    }
}
