//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ConversionError;
use crate::catalog::FormatId;

/// Outcome of a conversion: the complete output text, or the reason it failed.
pub type ConversionResult = Result<String, ConversionError>;

/// Which side of a conversion a format was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatRole {
    Source,
    Target,
}

impl fmt::Display for FormatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// A single conversion request.
///
/// `input` is expected to be trimmed by the caller; it is passed to the
/// engine unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub from_format: FormatId,
    pub to_format: FormatId,
    pub input: String,
}

impl ConversionRequest {
    pub fn new(
        from_format: impl Into<FormatId>,
        to_format: impl Into<FormatId>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            from_format: from_format.into(),
            to_format: to_format.into(),
            input: input.into(),
        }
    }
}
