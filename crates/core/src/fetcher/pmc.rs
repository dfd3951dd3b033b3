//! PubMed Central client for the NCBI literature citation exporter.
//!
//! The exporter renders a citation for a PMC id in a requested format:
//! `GET <base_url>?format=ris&id=PMC12345`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{FetchError, RecordSource, CANONICAL_FORMAT};

/// PMC client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmcConfig {
    /// Citation exporter endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Client identifier sent as User-Agent.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds. Unset keeps the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://api.ncbi.nlm.nih.gov/lit/ctxp/v1/pmc/".to_string()
}

fn default_user_agent() -> String {
    "bibu".to_string()
}

impl Default for PmcConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

/// PubMed Central record source.
pub struct PmcClient {
    client: Client,
    base_url: String,
}

impl PmcClient {
    /// Create a new PMC client.
    pub fn new(config: PmcConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RecordSource for PmcClient {
    fn name(&self) -> &str {
        "pmc"
    }

    async fn fetch(&self, external_id: &str) -> Result<String, FetchError> {
        debug!("PMC fetch: id='{}'", external_id);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("format", CANONICAL_FORMAT), ("id", external_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(body)
    }
}
