//! Catalog-aware front for a conversion engine.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use super::error::ConversionError;
use super::traits::ConversionEngine;
use super::types::{ConversionRequest, FormatRole};
use crate::catalog::{FormatCatalog, FormatId};
use crate::metrics::{CONVERSIONS_TOTAL, CONVERSION_DURATION};

/// Drives single conversion requests through an engine.
///
/// The adapter checks both formats against the catalog and rejects empty
/// input before the engine is involved. Everything else goes to the engine
/// exactly once, including same-format conversions. No retries, no caching.
#[derive(Clone)]
pub struct ConversionAdapter {
    catalog: Arc<FormatCatalog>,
    engine: Arc<dyn ConversionEngine>,
}

impl ConversionAdapter {
    pub fn new(catalog: Arc<FormatCatalog>, engine: Arc<dyn ConversionEngine>) -> Self {
        Self { catalog, engine }
    }

    pub fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Converts `request.input` from `request.from_format` to `request.to_format`.
    pub async fn convert(&self, request: &ConversionRequest) -> Result<String, ConversionError> {
        self.convert_parts(&request.from_format, &request.to_format, &request.input)
            .await
    }

    pub async fn convert_parts(
        &self,
        from: &FormatId,
        to: &FormatId,
        input: &str,
    ) -> Result<String, ConversionError> {
        let result = self.run(from, to, input).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        CONVERSIONS_TOTAL.with_label_values(&[outcome]).inc();

        if let Err(e) = &result {
            warn!("Conversion {} -> {} failed: {}", from, to, e);
        }
        result
    }

    async fn run(
        &self,
        from: &FormatId,
        to: &FormatId,
        input: &str,
    ) -> Result<String, ConversionError> {
        self.check_format(from, FormatRole::Source)?;
        self.check_format(to, FormatRole::Target)?;

        if input.trim().is_empty() {
            return Err(ConversionError::malformed_input("input is empty"));
        }

        debug!(
            "Converting {} -> {} with {} ({} bytes)",
            from,
            to,
            self.engine.name(),
            input.len()
        );

        let start = Instant::now();
        let result = self.engine.convert(from, to, input).await;
        CONVERSION_DURATION
            .with_label_values(&[self.engine.name()])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    /// Ensures `id` is known and usable on the `role` side of a conversion.
    pub fn check_format(&self, id: &FormatId, role: FormatRole) -> Result<(), ConversionError> {
        let usable = self.catalog.get(id.as_str()).is_some_and(|d| match role {
            FormatRole::Source => d.direction.is_source(),
            FormatRole::Target => d.direction.is_target(),
        });

        if usable {
            Ok(())
        } else {
            Err(ConversionError::unknown_format(id.clone(), role))
        }
    }
}
