//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::PublisherError;

/// Configuration for a [`PublisherClient`](crate::PublisherClient).
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the verification service.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Seconds a cached record stays fresh.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Per-request timeout for the bundled HTTP loader.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    // One day; also the cadence at which the prefix list is refreshed.
    86_400
}

fn default_request_timeout_secs() -> u64 {
    10
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, PublisherError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PublisherError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PublisherError> {
        toml::from_str(s).map_err(|e| PublisherError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ClientConfig is always serializable to TOML")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
