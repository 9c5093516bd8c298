//! Websupport ACME DNS-01 Hook Library
//!
//! Publishes and removes ACME challenge TXT records through the signed
//! Websupport REST API.

pub mod challenge;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod records;
pub mod signer;

pub use challenge::{ChallengeController, ChallengeRequest, CleanupOutcome, Command, Outcome};
pub use client::{RecordStore, WebsupportClient};
pub use config::Config;
pub use domain::ChallengeDomain;
pub use error::{HookError, Result};
pub use records::{RecordType, ZoneRecord};
pub use signer::{Credential, SignedRequest, Signer};
