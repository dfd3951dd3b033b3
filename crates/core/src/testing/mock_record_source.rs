//! Mock record source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, RecordSource};

/// Mock implementation of the RecordSource trait.
///
/// Provides controllable behavior for testing:
/// - Serve configured records by id
/// - Track requested ids for assertions
/// - Simulate upstream failures
///
/// Unknown ids answer like the real service does for a missing record: a
/// 404 status.
#[derive(Debug)]
pub struct MockRecordSource {
    /// Records by external id.
    records: Arc<RwLock<HashMap<String, String>>>,
    /// Requested ids, in order.
    queries: Arc<RwLock<Vec<String>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<FetchError>>>,
}

impl Default for MockRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRecordSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a record served for `external_id`.
    pub async fn add_record(&self, external_id: impl Into<String>, body: impl Into<String>) {
        self.records
            .write()
            .await
            .insert(external_id.into(), body.into());
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all requested ids.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, external_id: &str) -> Result<String, FetchError> {
        self.queries.write().await.push(external_id.to_string());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        match self.records.read().await.get(external_id) {
            Some(body) if body.trim().is_empty() => Err(FetchError::EmptyBody),
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}
