//! Bridge for engines that report completion through a callback.
//!
//! Some conversion libraries expose `convert(from, to, input, on_complete)`
//! instead of returning a value. [`CallbackEngine`] turns that shape into a
//! single awaited result: the completion handed to the library is `FnOnce`,
//! so it can fire at most once, and a completion that is dropped without
//! firing resolves the call as an engine failure instead of hanging.

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::warn;

use super::error::ConversionError;
use super::traits::ConversionEngine;
use crate::catalog::FormatId;

/// Completion handed to a callback-style engine.
pub type Completion = Box<dyn FnOnce(Result<String, ConversionError>) + Send + 'static>;

/// Adapts a callback-style conversion function to [`ConversionEngine`].
pub struct CallbackEngine<F> {
    name: String,
    call: F,
}

impl<F> CallbackEngine<F>
where
    F: Fn(&FormatId, &FormatId, String, Completion) + Send + Sync,
{
    pub fn new(name: impl Into<String>, call: F) -> Self {
        Self {
            name: name.into(),
            call,
        }
    }
}

#[async_trait]
impl<F> ConversionEngine for CallbackEngine<F>
where
    F: Fn(&FormatId, &FormatId, String, Completion) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn convert(
        &self,
        from: &FormatId,
        to: &FormatId,
        input: &str,
    ) -> Result<String, ConversionError> {
        let (tx, rx) = oneshot::channel();
        let completion: Completion = Box::new(move |result| {
            // The receiver is gone when the request was abandoned.
            let _ = tx.send(result);
        });

        (self.call)(from, to, input.to_string(), completion);

        match rx.await {
            Ok(result) => result,
            Err(_) => {
                warn!("{} dropped its completion without reporting a result", self.name);
                Err(ConversionError::engine_failure(
                    format!("{} finished without reporting a result", self.name),
                    None,
                ))
            }
        }
    }
}
