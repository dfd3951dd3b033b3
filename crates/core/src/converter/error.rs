//! Error types for the converter module.

use thiserror::Error;

use super::types::FormatRole;
use crate::catalog::FormatId;

/// Terminal outcome of a failed conversion.
///
/// None of these are retried; each is reported to the caller as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// A requested format is not in the catalog, or cannot be used on the
    /// requested side of the conversion.
    #[error("Unknown {role} format: {format}")]
    UnknownFormat { format: FormatId, role: FormatRole },

    /// The engine could not read the input as the declared source format.
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    /// The engine failed for a reason unrelated to the input.
    #[error("Conversion engine failed: {reason}")]
    EngineFailure {
        reason: String,
        stderr: Option<String>,
    },
}

impl ConversionError {
    pub fn unknown_format(format: impl Into<FormatId>, role: FormatRole) -> Self {
        Self::UnknownFormat {
            format: format.into(),
            role,
        }
    }

    pub fn malformed_input(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn engine_failure(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::EngineFailure {
            reason: reason.into(),
            stderr,
        }
    }

    /// Stable machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownFormat { .. } => "unknown_format",
            Self::MalformedInput { .. } => "malformed_input",
            Self::EngineFailure { .. } => "engine_failure",
        }
    }

    /// Whether the caller sent something the service cannot work with.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::UnknownFormat { .. } | Self::MalformedInput { .. })
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        Self::engine_failure(format!("I/O error: {}", err), None)
    }
}
