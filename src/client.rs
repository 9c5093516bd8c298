//! Websupport API Client
//!
//! Signed calls against the zone record endpoints of the Websupport REST
//! API. No retries: the first failure is returned to the caller.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, DATE};
use reqwest::{Client, Method};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{HookError, Result};
use crate::records::{RecordList, ZoneRecord};
use crate::signer::Signer;

/// Zone record operations the challenge controller needs
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List all records of a zone, in provider order
    async fn list_records(&self, zone: &str) -> Result<Vec<ZoneRecord>>;

    /// Create a record in a zone
    async fn create_record(&self, zone: &str, record: &ZoneRecord) -> Result<()>;

    /// Delete a record by its provider-assigned ID
    async fn delete_record(&self, zone: &str, id: u64) -> Result<()>;
}

/// Path of a zone's record collection
pub fn records_path(zone: &str) -> String {
    format!("/v1/user/self/zone/{}/record", zone)
}

/// Path of a single record
pub fn record_path(zone: &str, id: u64) -> String {
    format!("/v1/user/self/zone/{}/record/{}", zone, id)
}

/// Websupport REST client
pub struct WebsupportClient {
    client: Client,
    config: Config,
    signer: Signer,
}

impl WebsupportClient {
    /// Create a client from the hook configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("websupport-acme-hook/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            signer: Signer::new(config.credential.clone()),
        })
    }

    /// Perform one signed call and return the raw response body
    ///
    /// Any 2xx status yields the body unmodified; other statuses become
    /// [`HookError::Api`].
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&ZoneRecord>,
    ) -> Result<Vec<u8>> {
        let signed = self.signer.sign(&method, path);
        info!("WSAPI >> {}", signed.canonical());

        let mut request = self
            .client
            .request(method, self.config.url(path))
            .header(AUTHORIZATION, signed.authorization(self.signer.credential().key()))
            .header(DATE, signed.date_header())
            .header(ACCEPT, "application/json");

        if let Some(record) = body {
            request = request.json(record);
        }

        let response = request.send().await?;
        let status = response.status();
        let data = response.bytes().await?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&data),
                "WSAPI !! request rejected"
            );
            return Err(HookError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        debug!(status = status.as_u16(), bytes = data.len(), "WSAPI << response");
        Ok(data.to_vec())
    }
}

#[async_trait]
impl RecordStore for WebsupportClient {
    async fn list_records(&self, zone: &str) -> Result<Vec<ZoneRecord>> {
        let data = self.call(Method::GET, &records_path(zone), None).await?;
        let list: RecordList = serde_json::from_slice(&data)?;

        debug!(zone = %zone, count = list.items.len(), "Listed zone records");
        Ok(list.items)
    }

    async fn create_record(&self, zone: &str, record: &ZoneRecord) -> Result<()> {
        self.call(Method::POST, &records_path(zone), Some(record)).await?;
        Ok(())
    }

    async fn delete_record(&self, zone: &str, id: u64) -> Result<()> {
        self.call(Method::DELETE, &record_path(zone, id), None).await?;
        Ok(())
    }
}
