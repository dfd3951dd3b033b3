//! Format catalog and format sniffing handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use bibu_core::{CatalogDump, FormatId, ResolvedFormats};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
}

/// Result of a format lookup.
///
/// `format` is a single id for an unambiguous match, a list when several
/// formats share the signature, and absent when nothing matched.
#[derive(Debug, Serialize)]
pub struct FormatMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<MatchedFormats>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MatchedFormats {
    One(FormatId),
    Many(Vec<FormatId>),
}

impl From<ResolvedFormats> for FormatMatch {
    fn from(resolved: ResolvedFormats) -> Self {
        let mut candidates = resolved.into_candidates();
        let format = match candidates.len() {
            0 => None,
            1 => candidates.pop().map(MatchedFormats::One),
            _ => Some(MatchedFormats::Many(candidates)),
        };
        Self { format }
    }
}

/// GET /api/formats
///
/// Full catalog dump for populating format selectors and sniffing on the
/// client.
pub async fn list_formats(State(state): State<Arc<AppState>>) -> Json<CatalogDump> {
    Json(state.catalog().dump())
}

/// GET /api/format?filename=&mimetype=
///
/// Guess the format of a file from its name and/or MIME type.
pub async fn resolve_format(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveParams>,
) -> Json<FormatMatch> {
    let resolved = state
        .resolver()
        .resolve(params.filename.as_deref(), params.mimetype.as_deref());
    Json(resolved.into())
}
