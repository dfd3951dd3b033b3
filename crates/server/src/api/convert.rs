//! Conversion handlers: local text and remote records.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bibu_core::{
    ConversionError, ConversionRequest, FetchError, FormatId, PipelineError, RemoteRecordQuery,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ConvertParams {
    /// Serve the output as a file attachment.
    #[serde(default)]
    pub download: bool,
}

#[derive(Debug, Deserialize)]
pub struct RemoteParams {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "toFormat")]
    pub to_format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn conversion_error(err: &ConversionError) -> ApiError {
    let status = match err {
        ConversionError::UnknownFormat { .. } => StatusCode::BAD_REQUEST,
        ConversionError::MalformedInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ConversionError::EngineFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind().to_string(),
            upstream_status: None,
        }),
    )
}

fn pipeline_error(err: &PipelineError) -> ApiError {
    match err {
        // Only an upstream record can be malformed here: the fetch never
        // yields an empty body, and formats are checked before fetching.
        PipelineError::Conversion(e @ ConversionError::MalformedInput { .. }) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
                kind: e.kind().to_string(),
                upstream_status: None,
            }),
        ),
        PipelineError::Conversion(e) => conversion_error(e),
        PipelineError::RemoteFetch(e @ FetchError::InvalidIdentifier(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
                kind: "invalid_identifier".to_string(),
                upstream_status: None,
            }),
        ),
        PipelineError::RemoteFetch(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: err.to_string(),
                kind: err.kind().to_string(),
                upstream_status: e.upstream_status(),
            }),
        ),
    }
}

fn text_response(output: String, attachment: Option<String>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    if let Some(filename) = attachment {
        let disposition = format!("attachment; filename=\"{}\"", filename);
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
    }
    (headers, output).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/convert
///
/// Convert `input` from `fromFormat` to `toFormat`. The body of a successful
/// response is the converted text.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
    Json(request): Json<ConversionRequest>,
) -> Result<Response, ApiError> {
    match state.adapter().convert(&request).await {
        Ok(output) => {
            let attachment = params.download.then(|| {
                format!(
                    "converted{}",
                    state.catalog().export_extension(request.to_format.as_str())
                )
            });
            Ok(text_response(output, attachment))
        }
        Err(e) => Err(conversion_error(&e)),
    }
}

/// GET /api/pmc?id=&toFormat=
///
/// Fetch a PubMed Central record and convert it (RIS when `toFormat` is
/// omitted).
pub async fn fetch_pmc(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RemoteParams>,
) -> Result<Response, ApiError> {
    let mut query = RemoteRecordQuery::new(params.id.unwrap_or_default());
    if let Some(to_format) = params.to_format.filter(|f| !f.trim().is_empty()) {
        query = query.with_format(FormatId::new(to_format.trim()));
    }

    match state.fetcher().fetch_and_convert(&query).await {
        Ok(output) => Ok(text_response(output, None)),
        Err(e) => Err(pipeline_error(&e)),
    }
}
