//! Challenge domain decomposition
//!
//! Splits a trailing-dot FQDN into the record name and the Websupport zone.
//! The zone is always taken to be the last two labels. Domains under
//! multi-label public suffixes such as `co.uk` split incorrectly
//! (`example.co.uk.` yields zone `co.uk`); fixing that needs a public
//! suffix list.

use crate::error::{HookError, Result};

/// A challenge FQDN split into record name and zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeDomain {
    /// Record name relative to the zone (e.g. `_acme-challenge.www`)
    pub subdomain: String,
    /// Registrable base domain managed as a zone (e.g. `example.com`)
    pub base: String,
}

impl ChallengeDomain {
    /// Split `<subdomain>.<label>.<label>.` into its parts
    ///
    /// Fails with [`HookError::MalformedInput`] when the trailing dot is
    /// missing or there are fewer than three non-empty labels.
    pub fn parse(fqdn: &str) -> Result<Self> {
        let malformed = || HookError::MalformedInput {
            fqdn: fqdn.to_string(),
        };

        let name = fqdn.strip_suffix('.').ok_or_else(malformed)?;

        let mut labels = name.rsplitn(3, '.');
        let tld = labels.next().ok_or_else(malformed)?;
        let domain = labels.next().ok_or_else(malformed)?;
        let subdomain = labels.next().ok_or_else(malformed)?;

        if tld.is_empty() || domain.is_empty() || subdomain.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            subdomain: subdomain.to_string(),
            base: format!("{}.{}", domain, tld),
        })
    }

    /// Rebuild the FQDN, trailing dot included
    pub fn fqdn(&self) -> String {
        format!("{}.{}.", self.subdomain, self.base)
    }
}

impl std::fmt::Display for ChallengeDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (zone {})", self.subdomain, self.base)
    }
}
