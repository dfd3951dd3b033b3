pub mod catalog;
pub mod config;
pub mod converter;
pub mod fetcher;
pub mod metrics;
pub mod resolver;
pub mod testing;

pub use catalog::{
    CatalogDump, CatalogError, Direction, FormatCatalog, FormatDescriptor, FormatId,
    FALLBACK_EXPORT_EXTENSION,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ServerConfig,
    UiConfig,
};
pub use converter::{
    BibutilsEngine, CallbackEngine, Completion, ConversionAdapter, ConversionEngine,
    ConversionError, ConversionRequest, ConversionResult, EngineConfig, FormatRole,
};
pub use fetcher::{
    FetchError, PipelineError, PmcClient, PmcConfig, RecordFetcher, RecordSource,
    RemoteRecordQuery, CANONICAL_FORMAT, DEFAULT_OUTPUT_FORMAT,
};
pub use resolver::{FormatResolver, MatchSource, ResolvedFormats};
