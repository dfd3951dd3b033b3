use std::sync::Arc;

use bibu_core::{
    Config, ConversionAdapter, ConversionEngine, FormatCatalog, FormatResolver, RecordFetcher,
    RecordSource,
};

/// Shared application state
pub struct AppState {
    config: Config,
    resolver: FormatResolver,
    adapter: ConversionAdapter,
    fetcher: RecordFetcher,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<FormatCatalog>,
        engine: Arc<dyn ConversionEngine>,
        source: Arc<dyn RecordSource>,
    ) -> Self {
        let adapter = ConversionAdapter::new(Arc::clone(&catalog), engine);
        let fetcher = RecordFetcher::new(source, adapter.clone());

        Self {
            config,
            resolver: FormatResolver::new(catalog),
            adapter,
            fetcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &FormatCatalog {
        self.adapter.catalog()
    }

    pub fn resolver(&self) -> &FormatResolver {
        &self.resolver
    }

    pub fn adapter(&self) -> &ConversionAdapter {
        &self.adapter
    }

    pub fn fetcher(&self) -> &RecordFetcher {
        &self.fetcher
    }
}
