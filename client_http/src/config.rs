//! Connection settings for the service endpoint.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Base URL of the action gateway.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Contract that hosts ballots and the voter treasury.
    #[serde(default = "default_ballot_contract")]
    pub ballot_contract: String,

    /// Contract that moves tokens.
    #[serde(default = "default_token_contract")]
    pub token_contract: String,

    /// Permission the operator signs with.
    #[serde(default = "default_permission")]
    pub permission: String,

    /// Ledger name the ballot counter is added to. The ballot for counter
    /// value `n` is keyed by the name whose 64-bit value is `base + n`.
    #[serde(default = "default_ballot_base")]
    pub ballot_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8888".to_string()
}

fn default_ballot_contract() -> String {
    "decide".to_string()
}

fn default_token_contract() -> String {
    "eosio.token".to_string()
}

fn default_permission() -> String {
    "active".to_string()
}

fn default_ballot_base() -> String {
    "oig".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            ballot_contract: default_ballot_contract(),
            token_contract: default_token_contract(),
            permission: default_permission(),
            ballot_base: default_ballot_base(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl HttpClientConfig {
    pub fn actions_url(&self) -> String {
        format!("{}/v1/actions", self.endpoint.trim_end_matches('/'))
    }

    pub fn account_url(&self, account: &str) -> String {
        format!(
            "{}/v1/accounts/{}",
            self.endpoint.trim_end_matches('/'),
            account
        )
    }
}
