use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::AuthMethod;
use crate::error::{ProtocolError, ProtocolResult};
use crate::request::Request;

/// Environment variable overriding [`ClientConfig::api_url`].
pub const API_URL_ENV: &str = "KVGRAPH_API_URL";
/// Environment variable overriding [`ClientConfig::api_key`].
pub const API_KEY_ENV: &str = "KVGRAPH_API_KEY";

/// Connection settings handed to a transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, including the version segment.
    pub api_url: String,
    /// Sent as HTTP Basic credentials when present.
    pub api_key: Option<String>,
    pub user_agent: String,
    /// Per-request timeout enforced by the transport.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.kvgraph.io/v0".into(),
            api_key: None,
            user_agent: concat!("kvgraph/", env!("CARGO_PKG_VERSION")).into(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> ProtocolResult<Self> {
        toml::from_str(source).map_err(|e| ProtocolError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> ProtocolResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Apply `KVGRAPH_API_URL` / `KVGRAPH_API_KEY` from the process
    /// environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn auth(&self) -> AuthMethod {
        match &self.api_key {
            Some(key) => AuthMethod::ApiKey(key.clone()),
            None => AuthMethod::Anonymous,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL for `request`.
    pub fn url_for(&self, request: &Request) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            request.target().trim_start_matches('/')
        )
    }
}
