//! Mock conversion engine for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::FormatId;
use crate::converter::{ConversionEngine, ConversionError};

/// A recorded engine invocation for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub from: FormatId,
    pub to: FormatId,
    pub input: String,
}

#[derive(Debug, Clone)]
enum Output {
    Fixed(String),
    Echo,
}

/// Mock implementation of the ConversionEngine trait.
///
/// Provides controllable behavior for testing:
/// - Track every invocation for assertions
/// - Return a fixed output, or echo the input back
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use bibu_core::testing::MockEngine;
///
/// let engine = MockEngine::with_output("@article{x}");
///
/// let output = engine.convert(&"ris".into(), &"bib".into(), "TY  - JOUR").await?;
/// assert_eq!(output, "@article{x}");
/// assert_eq!(engine.call_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockEngine {
    /// Recorded invocations.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// What a successful call returns.
    output: Arc<RwLock<Output>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<ConversionError>>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Create a mock engine that answers every call with `"converted"`.
    pub fn new() -> Self {
        Self::with_output("converted")
    }

    /// Create a mock engine that answers every call with `output`.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            output: Arc::new(RwLock::new(Output::Fixed(output.into()))),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a mock engine that returns its input unchanged.
    pub fn echo() -> Self {
        let mut engine = Self::new();
        engine.output = Arc::new(RwLock::new(Output::Echo));
        engine
    }

    /// Set the output returned by subsequent calls.
    pub async fn set_output(&self, output: impl Into<String>) {
        *self.output.write().await = Output::Fixed(output.into());
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: ConversionError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded invocations.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of invocations.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Clear recorded invocations.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }
}

#[async_trait]
impl ConversionEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(
        &self,
        from: &FormatId,
        to: &FormatId,
        input: &str,
    ) -> Result<String, ConversionError> {
        self.calls.write().await.push(RecordedCall {
            from: from.clone(),
            to: to.clone(),
            input: input.to_string(),
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        match &*self.output.read().await {
            Output::Fixed(output) => Ok(output.clone()),
            Output::Echo => Ok(input.to_string()),
        }
    }
}
