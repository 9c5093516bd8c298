//! Challenge Controller
//!
//! Runs one `present` or `cleanup` transaction against a [`RecordStore`].
//! Both are linear: the first error aborts the run and nothing is rolled back.

use std::str::FromStr;

use serde::de::Error as _;
use tracing::info;

use crate::client::RecordStore;
use crate::domain::ChallengeDomain;
use crate::error::{HookError, Result};
use crate::records::ZoneRecord;

/// Hook command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Publish the challenge TXT record
    Present,
    /// Remove the challenge TXT record
    Cleanup,
}

impl FromStr for Command {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "present" => Ok(Command::Present),
            "cleanup" => Ok(Command::Cleanup),
            other => Err(HookError::UnknownCommand(other.to_string())),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Present => write!(f, "present"),
            Command::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Input of a hook run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRequest {
    /// Challenge FQDN with trailing dot
    pub fqdn: String,
    /// Validation token published as TXT content
    pub token: String,
}

impl ChallengeRequest {
    pub fn new(fqdn: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            token: token.into(),
        }
    }
}

/// Result of a cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The matching record was deleted
    Deleted { id: u64 },
    /// No matching record existed; not an error
    NotFound,
}

/// Result of a hook run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Presented,
    Cleanup(CleanupOutcome),
}

/// Orchestrates challenge records in a provider zone
pub struct ChallengeController<S> {
    store: S,
}

impl<S: RecordStore> ChallengeController<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Dispatch a command
    pub async fn run(&self, command: Command, request: &ChallengeRequest) -> Result<Outcome> {
        match command {
            Command::Present => {
                self.present(request).await?;
                Ok(Outcome::Presented)
            }
            Command::Cleanup => Ok(Outcome::Cleanup(self.cleanup(request).await?)),
        }
    }

    /// Create the challenge TXT record
    ///
    /// Success means the provider accepted the creation; the record is not
    /// read back.
    pub async fn present(&self, request: &ChallengeRequest) -> Result<()> {
        let domain = ChallengeDomain::parse(&request.fqdn)?;
        let record = ZoneRecord::challenge(&domain.subdomain, &request.token);

        self.store.create_record(&domain.base, &record).await?;

        info!(
            zone = %domain.base,
            name = %domain.subdomain,
            "Created TXT record"
        );
        Ok(())
    }

    /// Delete the first TXT record matching the subdomain and token
    pub async fn cleanup(&self, request: &ChallengeRequest) -> Result<CleanupOutcome> {
        let domain = ChallengeDomain::parse(&request.fqdn)?;
        let records = self.store.list_records(&domain.base).await?;

        let Some(record) = records
            .iter()
            .find(|r| r.is_challenge(&domain.subdomain, &request.token))
        else {
            info!(
                "Record {} for domain {} not found",
                request.token, domain.subdomain
            );
            return Ok(CleanupOutcome::NotFound);
        };

        let id = record.id.ok_or_else(|| {
            HookError::Decode(serde_json::Error::custom(format!(
                "TXT record '{}' in zone {} has no id",
                domain.subdomain, domain.base
            )))
        })?;

        info!("Deleting record ID {}", id);
        self.store.delete_record(&domain.base, id).await?;

        Ok(CleanupOutcome::Deleted { id })
    }
}
