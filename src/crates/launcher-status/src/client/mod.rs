//! Status retrieval clients.
//!
//! [`StatusClient`] is the seam the poller fetches through. [`HttpStatusClient`]
//! is the production implementation: one GET against the configured status
//! endpoint, no retries (the next attempt is the next poll tick).
//!
//! # Example
//!
//! ```rust,ignore
//! use launcher_status::client::{HttpStatusClient, StatusClient};
//! use launcher_status::config::StatusConfig;
//!
//! let client = HttpStatusClient::new(&StatusConfig::default())?;
//! let statuses = client.fetch_statuses().await?;
//! ```

pub mod wire;

use crate::config::StatusConfig;
use crate::error::{Result, StatusError};
use crate::model::ServiceStatus;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::debug;

/// Source of service statuses.
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Fetch the full list of service statuses.
    ///
    /// Transport failures, non-success responses and malformed bodies are all
    /// reported as errors; there is no partial result.
    async fn fetch_statuses(&self) -> Result<Vec<ServiceStatus>>;
}

/// HTTP client for a public status endpoint.
#[derive(Debug, Clone)]
pub struct HttpStatusClient {
    endpoint: Url,
    client: Client,
}

impl HttpStatusClient {
    /// Create a client from configuration.
    pub fn new(config: &StatusConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;

        let mut builder = Client::builder().timeout(config.timeout());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|e| StatusError::ClientError(e.to_string()))?;

        Ok(Self { endpoint, client })
    }

    /// Endpoint this client polls.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl StatusClient for HttpStatusClient {
    async fn fetch_statuses(&self) -> Result<Vec<ServiceStatus>> {
        debug!(endpoint = %self.endpoint, "Requesting service statuses");

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let statuses = wire::parse_status_document(&body)?;

        debug!(services = statuses.len(), "Service statuses retrieved");
        Ok(statuses)
    }
}
