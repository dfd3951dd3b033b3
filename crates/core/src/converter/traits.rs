//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConversionError;
use crate::catalog::FormatId;

/// An external engine that turns text in one bibliographic format into
/// another.
///
/// One call converts one input into one output. Implementations must not
/// retry or cache; the adapter relies on exactly one engine invocation per
/// request.
#[async_trait]
pub trait ConversionEngine: Send + Sync {
    /// Returns the name of this engine implementation.
    fn name(&self) -> &str;

    /// Converts `input` from `from` to `to`.
    ///
    /// Input the engine cannot read must be reported as
    /// [`ConversionError::MalformedInput`]; anything else that goes wrong is
    /// [`ConversionError::EngineFailure`].
    async fn convert(
        &self,
        from: &FormatId,
        to: &FormatId,
        input: &str,
    ) -> Result<String, ConversionError>;

    /// Validates that the engine is properly installed and ready.
    async fn validate(&self) -> Result<(), ConversionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseEngine;

    #[async_trait]
    impl ConversionEngine for UppercaseEngine {
        fn name(&self) -> &str {
            "uppercase"
        }

        async fn convert(
            &self,
            _from: &FormatId,
            _to: &FormatId,
            input: &str,
        ) -> Result<String, ConversionError> {
            Ok(input.to_uppercase())
        }
    }

    #[tokio::test]
    async fn test_engine_trait_object() {
        let engine: Box<dyn ConversionEngine> = Box::new(UppercaseEngine);
        assert_eq!(engine.name(), "uppercase");
        assert!(engine.validate().await.is_ok());

        let output = engine
            .convert(&FormatId::from("a"), &FormatId::from("b"), "ty  - jour")
            .await
            .unwrap();
        assert_eq!(output, "TY  - JOUR");
    }
}
