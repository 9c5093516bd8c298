//! Websupport request signing
//!
//! Each call is authenticated with HTTP Basic auth where the password is an
//! HMAC-SHA1 over `"<METHOD> <PATH> <UNIX_SECONDS>"` keyed with the API
//! secret. The same instant is sent in the `Date` header as RFC 3339.
//! Signatures embed the current second, so one is computed per request.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Websupport API key pair
#[derive(Clone, Default)]
pub struct Credential {
    key: String,
    secret: String,
}

impl Credential {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Public API key, sent as the Basic auth username
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Signature material for a single API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: Method,
    pub path: String,
    pub timestamp: DateTime<Utc>,
    /// Hex-encoded HMAC-SHA1 of [`SignedRequest::canonical`]
    pub signature: String,
}

impl SignedRequest {
    /// The string the signature is computed over
    pub fn canonical(&self) -> String {
        canonical_string(&self.method, &self.path, &self.timestamp)
    }

    /// `Date` header value
    pub fn date_header(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `Authorization` header value for the given API key
    pub fn authorization(&self, key: &str) -> String {
        let userpass = format!("{}:{}", key, self.signature);
        format!("Basic {}", STANDARD.encode(userpass))
    }
}

/// Signs API requests with a fixed credential
#[derive(Debug, Clone)]
pub struct Signer {
    credential: Credential,
}

impl Signer {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Sign a request for the current second
    pub fn sign(&self, method: &Method, path: &str) -> SignedRequest {
        self.sign_at(method, path, Utc::now())
    }

    /// Sign a request for an explicit instant
    ///
    /// Sub-second precision is dropped so the signed value and the `Date`
    /// header describe the same second.
    pub fn sign_at(&self, method: &Method, path: &str, at: DateTime<Utc>) -> SignedRequest {
        let timestamp = DateTime::<Utc>::from_timestamp(at.timestamp(), 0).unwrap_or(at);
        let canonical = canonical_string(method, path, &timestamp);

        let mut mac = HmacSha1::new_from_slice(self.credential.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(canonical.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        SignedRequest {
            method: method.clone(),
            path: path.to_string(),
            timestamp,
            signature,
        }
    }
}

fn canonical_string(method: &Method, path: &str, timestamp: &DateTime<Utc>) -> String {
    format!("{} {} {}", method, path, timestamp.timestamp())
}
