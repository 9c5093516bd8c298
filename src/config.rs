//! Hook configuration
//!
//! Loaded once at startup and passed by reference into the API client.

use std::time::Duration;

use crate::signer::Credential;

/// Default Websupport REST endpoint
pub const DEFAULT_API_ROOT: &str = "https://rest.websupport.sk";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API root without a trailing slash
    pub api_root: String,
    pub credential: Credential,
    pub timeout: Duration,
}

impl Config {
    pub fn new(api_root: &str, credential: Credential, timeout: Duration) -> Self {
        Self {
            api_root: api_root.trim_end_matches('/').to_string(),
            credential,
            timeout,
        }
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_API_ROOT,
            Credential::default(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }
}
