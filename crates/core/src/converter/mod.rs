//! Converter module for bibliographic format conversion.
//!
//! This module provides the `ConversionEngine` trait, the engines that
//! implement it, and the `ConversionAdapter` that every conversion request
//! goes through.
//!
//! # Engines
//!
//! - `BibutilsEngine`: pipes text through the bibutils command-line tools
//! - `CallbackEngine`: wraps a completion-callback style conversion function
//!
//! # Example
//!
//! ```ignore
//! use bibu_core::converter::{BibutilsEngine, ConversionAdapter, ConversionRequest};
//!
//! let catalog = Arc::new(FormatCatalog::bibutils());
//! let engine = Arc::new(BibutilsEngine::with_defaults());
//!
//! // Validate the bibutils tools are available
//! engine.validate().await?;
//!
//! let adapter = ConversionAdapter::new(catalog, engine);
//! let request = ConversionRequest::new("ris", "bibtex", ris_text.trim());
//! let bibtex = adapter.convert(&request).await?;
//! ```

mod adapter;
mod bibutils;
mod callback;
mod config;
mod error;
mod traits;
mod types;

pub use adapter::ConversionAdapter;
pub use bibutils::BibutilsEngine;
pub use callback::{CallbackEngine, Completion};
pub use config::EngineConfig;
pub use error::ConversionError;
pub use traits::ConversionEngine;
pub use types::{ConversionRequest, ConversionResult, FormatRole};
