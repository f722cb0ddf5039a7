//! Node configuration with TOML file support.

use std::path::{Path, PathBuf};

use oig_client_http::HttpClientConfig;
use oig_types::{AccountName, ElectionParams};
use serde::{Deserialize, Serialize};

use crate::{LogFormat, NodeError};

/// Configuration for an election node.
///
/// Loaded from a TOML file via [`NodeConfig::from_toml_file`] or built in
/// code. Every field except `operator` has a default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Account that owns the election and signs outgoing actions.
    #[serde(default)]
    pub operator: Option<AccountName>,

    /// Seconds between two automatic advance attempts.
    #[serde(default = "default_advance_interval_secs")]
    pub advance_interval_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, e.g. `"info"` or `"debug,oig_election=trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Endpoint and contracts of the external services.
    #[serde(default)]
    pub service: HttpClientConfig,

    /// Election policy.
    #[serde(default)]
    pub params: ElectionParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./oig_data")
}

fn default_map_size() -> usize {
    256 * 1024 * 1024
}

fn default_advance_interval_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// The configured operator, or a config error when none is set.
    pub fn operator(&self) -> Result<AccountName, NodeError> {
        self.operator
            .clone()
            .ok_or_else(|| NodeError::Config("no operator account configured".to_string()))
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.advance_interval_secs == 0 {
            return Err(NodeError::Config(
                "advance_interval_secs must be positive".to_string(),
            ));
        }
        if self.params.sync_batch_size == 0 || self.params.cleanup_batch_size == 0 {
            return Err(NodeError::Config(
                "batch sizes must be positive".to_string(),
            ));
        }
        if self.params.auto_accept_limit > self.params.nomination_cap {
            return Err(NodeError::Config(format!(
                "auto_accept_limit ({}) exceeds nomination_cap ({})",
                self.params.auto_accept_limit, self.params.nomination_cap
            )));
        }
        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size: default_map_size(),
            operator: None,
            advance_interval_secs: default_advance_interval_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            service: HttpClientConfig::default(),
            params: ElectionParams::default(),
        }
    }
}
