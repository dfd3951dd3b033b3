//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, enabling E2E testing without bibutils or
//! network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use bibu_core::{
    testing::{MockEngine, MockRecordSource},
    Config, FormatCatalog, ServerConfig, UiConfig,
};
use bibu_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use bibu_core::testing::fixtures;

/// Contents of the UI bundle's index page in tests.
pub const INDEX_HTML: &str = "<!doctype html><title>bibu</title>";

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server over the full bibutils catalog with fully
/// controllable mocks for:
/// - Conversion (MockEngine)
/// - Remote records (MockRecordSource)
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_convert() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/convert", json!({
///         "fromFormat": "ris", "toFormat": "bibtex", "input": "TY  - JOUR"
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock engine - configure conversion output and failures
    pub engine: Arc<MockEngine>,
    /// Mock record source - configure remote records
    pub source: Arc<MockRecordSource>,
    /// UI bundle directory
    pub ui_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body text
    pub text: String,
    /// Body parsed as JSON, `Null` when it is not JSON
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with an echoing engine.
    pub fn new() -> Self {
        Self::with_engine(MockEngine::echo())
    }

    /// Create a test fixture around the given engine.
    pub fn with_engine(engine: MockEngine) -> Self {
        let ui_dir = TempDir::new().expect("Failed to create UI dir");
        std::fs::write(ui_dir.path().join("index.html"), INDEX_HTML)
            .expect("Failed to write index.html");

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            ui: UiConfig {
                dir: ui_dir.path().to_path_buf(),
            },
            ..Default::default()
        };

        let engine = Arc::new(engine);
        let source = Arc::new(MockRecordSource::new());

        let state = Arc::new(AppState::new(
            config,
            Arc::new(FormatCatalog::bibutils()),
            engine.clone(),
            source.clone(),
        ));

        Self {
            router: create_router(state),
            engine,
            source,
            ui_dir,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.post_raw(path, &body.to_string()).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&body_bytes).into_owned(),
            body: serde_json::from_slice(&body_bytes).unwrap_or(Value::Null),
        }
    }
}

/// Helper to assert response status with better error messages.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
