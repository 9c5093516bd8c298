//! Hook error taxonomy
//!
//! Every variant is fatal for the run. The binary converts the outermost
//! error into a diagnostic on stderr and a non-zero exit status.

use thiserror::Error;

/// Result type for hook operations
pub type Result<T> = std::result::Result<T, HookError>;

/// Errors raised while presenting or cleaning up a challenge record
#[derive(Debug, Error)]
pub enum HookError {
    /// The challenge FQDN is not of the form `<sub>.<label>.<label>.`
    #[error("Malformed challenge domain '{fqdn}': expected '<subdomain>.<domain>.<tld>.'")]
    MalformedInput { fqdn: String },

    /// Command other than `present` or `cleanup`
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Network or IO failure talking to the provider
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status
    #[error("Websupport API error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    /// Provider returned a body that is not the expected JSON
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}
