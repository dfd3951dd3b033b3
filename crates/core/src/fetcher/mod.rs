//! Remote record fetching.
//!
//! A [`RecordSource`] retrieves one bibliographic record from an external
//! literature service, always rendered in the canonical interchange format
//! ([`CANONICAL_FORMAT`]). [`RecordFetcher`] hands that record to the
//! conversion adapter to produce the format the caller asked for.
//!
//! The upstream call is made once per request: no retries, and no timeout
//! beyond what the transport is configured with.

mod pmc;

pub use pmc::{PmcClient, PmcConfig};

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::FormatId;
use crate::converter::{ConversionAdapter, ConversionError, FormatRole};
use crate::metrics::REMOTE_FETCHES_TOTAL;

/// Format every remote record is fetched in before conversion.
pub const CANONICAL_FORMAT: &str = "ris";

/// Output format used when the caller does not pick one.
pub const DEFAULT_OUTPUT_FORMAT: &str = "ris";

/// Errors that can occur when fetching a remote record.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The record identifier is empty.
    #[error("Invalid record identifier: {0:?}")]
    InvalidIdentifier(String),

    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status}")]
    Status { status: u16 },

    /// Upstream answered successfully but with nothing in the body.
    #[error("Upstream returned an empty record")]
    EmptyBody,
}

impl FetchError {
    /// Upstream HTTP status, when the failure carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    fn metric_label(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::HttpError(_) => "http_error",
            Self::Status { .. } => "status",
            Self::EmptyBody => "empty_body",
        }
    }
}

/// A remote service that returns records in [`CANONICAL_FORMAT`].
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Returns the name of this source.
    fn name(&self) -> &str;

    /// Fetches the record identified by `external_id`.
    ///
    /// A successful result is never empty.
    async fn fetch(&self, external_id: &str) -> Result<String, FetchError>;
}

/// A fetch-then-convert request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRecordQuery {
    pub external_id: String,
    #[serde(default)]
    pub to_format: Option<FormatId>,
}

impl RemoteRecordQuery {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            to_format: None,
        }
    }

    pub fn with_format(mut self, to_format: impl Into<FormatId>) -> Self {
        self.to_format = Some(to_format.into());
        self
    }

    /// Requested output format, or [`DEFAULT_OUTPUT_FORMAT`].
    pub fn target_format(&self) -> FormatId {
        self.to_format
            .clone()
            .unwrap_or_else(|| FormatId::from(DEFAULT_OUTPUT_FORMAT))
    }
}

/// Failure of the fetch-then-convert pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Remote fetch failed: {0}")]
    RemoteFetch(#[from] FetchError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl PipelineError {
    /// Stable machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemoteFetch(_) => "remote_fetch_failure",
            Self::Conversion(e) => e.kind(),
        }
    }
}

/// Fetches remote records and converts them.
#[derive(Clone)]
pub struct RecordFetcher {
    source: Arc<dyn RecordSource>,
    adapter: ConversionAdapter,
}

impl RecordFetcher {
    pub fn new(source: Arc<dyn RecordSource>, adapter: ConversionAdapter) -> Self {
        Self { source, adapter }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetches `query.external_id` and converts it to the requested format.
    ///
    /// Formats are checked before the upstream call, so a bad `to_format`
    /// costs no request. A failed or empty fetch is never converted.
    pub async fn fetch_and_convert(
        &self,
        query: &RemoteRecordQuery,
    ) -> Result<String, PipelineError> {
        let canonical = FormatId::from(CANONICAL_FORMAT);
        let to = query.target_format();

        self.adapter.check_format(&canonical, FormatRole::Source)?;
        self.adapter.check_format(&to, FormatRole::Target)?;

        let record = self.fetch(query.external_id.trim()).await?;

        let output = self.adapter.convert_parts(&canonical, &to, &record).await?;
        Ok(output)
    }

    async fn fetch(&self, external_id: &str) -> Result<String, FetchError> {
        let result = if external_id.is_empty() {
            Err(FetchError::InvalidIdentifier(external_id.to_string()))
        } else {
            debug!("Fetching {} from {}", external_id, self.source.name());
            self.source.fetch(external_id).await
        };

        let label = match &result {
            Ok(_) => "success",
            Err(e) => e.metric_label(),
        };
        REMOTE_FETCHES_TOTAL
            .with_label_values(&[self.source.name(), label])
            .inc();

        if let Err(e) = &result {
            warn!("Fetching {} from {} failed: {}", external_id, self.source.name(), e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockEngine, MockRecordSource};

    fn fetcher(engine: Arc<MockEngine>, source: Arc<MockRecordSource>) -> RecordFetcher {
        let adapter = ConversionAdapter::new(Arc::new(fixtures::test_catalog()), engine);
        RecordFetcher::new(source, adapter)
    }

    #[test]
    fn test_query_defaults_to_ris() {
        let query = RemoteRecordQuery::new("PMC1");
        assert_eq!(query.target_format().as_str(), "ris");

        let query = query.with_format("bib");
        assert_eq!(query.target_format().as_str(), "bib");
    }

    #[test]
    fn test_upstream_status() {
        assert_eq!(FetchError::Status { status: 503 }.upstream_status(), Some(503));
        assert_eq!(FetchError::EmptyBody.upstream_status(), None);
    }

    #[tokio::test]
    async fn test_fetch_then_convert() {
        let engine = Arc::new(MockEngine::with_output("@article{pmc}"));
        let source = Arc::new(MockRecordSource::new());
        source.add_record("PMC12345", fixtures::RIS_RECORD).await;

        let output = fetcher(engine.clone(), source.clone())
            .fetch_and_convert(&RemoteRecordQuery::new("PMC12345").with_format("bib"))
            .await
            .unwrap();

        assert_eq!(output, "@article{pmc}");
        let calls = engine.recorded_calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].from.as_str(), CANONICAL_FORMAT);
        assert_eq!(calls[0].to.as_str(), "bib");
        assert_eq!(calls[0].input, fixtures::RIS_RECORD);
        assert_eq!(source.recorded_queries().await, vec!["PMC12345".to_string()]);
    }

    #[tokio::test]
    async fn test_upstream_failure_skips_conversion() {
        let engine = Arc::new(MockEngine::new());
        let source = Arc::new(MockRecordSource::new());
        source.set_next_error(FetchError::Status { status: 500 }).await;

        let err = fetcher(engine.clone(), source)
            .fetch_and_convert(&RemoteRecordQuery::new("PMC12345").with_format("bib"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "remote_fetch_failure");
        match err {
            PipelineError::RemoteFetch(e) => assert_eq!(e.upstream_status(), Some(500)),
            other => panic!("Expected RemoteFetch, got {:?}", other),
        }
        assert_eq!(engine.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_target_skips_upstream() {
        let engine = Arc::new(MockEngine::new());
        let source = Arc::new(MockRecordSource::new());
        source.add_record("PMC1", fixtures::RIS_RECORD).await;

        let err = fetcher(engine.clone(), source.clone())
            .fetch_and_convert(&RemoteRecordQuery::new("PMC1").with_format("nope"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "unknown_format");
        assert!(source.recorded_queries().await.is_empty());
        assert_eq!(engine.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_blank_identifier_is_rejected() {
        let engine = Arc::new(MockEngine::new());
        let source = Arc::new(MockRecordSource::new());

        let err = fetcher(engine.clone(), source.clone())
            .fetch_and_convert(&RemoteRecordQuery::new("   "))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::RemoteFetch(FetchError::InvalidIdentifier(_))
        ));
        assert!(source.recorded_queries().await.is_empty());
    }
}
