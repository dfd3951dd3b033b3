//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external collaborator
//! traits, so conversions and remote fetches can be exercised end to end
//! without bibutils or network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use bibu_core::testing::{fixtures, MockEngine, MockRecordSource};
//!
//! let engine = MockEngine::with_output("@article{x}");
//! let source = MockRecordSource::new();
//! source.add_record("PMC12345", fixtures::RIS_RECORD).await;
//!
//! // Use in AppState...
//! ```

mod mock_engine;
mod mock_record_source;

pub use mock_engine::{MockEngine, RecordedCall};
pub use mock_record_source::MockRecordSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{Direction, FormatCatalog, FormatDescriptor};

    /// A single RIS record.
    pub const RIS_RECORD: &str = concat!(
        "TY  - JOUR\n",
        "TI  - Citation formats in practice\n",
        "AU  - Doe, Jane\n",
        "PY  - 2021\n",
        "JO  - Journal of Examples\n",
        "ER  - ",
    );

    /// A single BibTeX record.
    pub const BIBTEX_RECORD: &str = concat!(
        "@article{doe2021,\n",
        "  title = {Citation formats in practice},\n",
        "  author = {Doe, Jane},\n",
        "  year = {2021}\n",
        "}",
    );

    /// Small catalog with an ambiguous `.xml` extension and one-directional
    /// formats:
    ///
    /// - `ris`  (both)   `.ris`, `application/x-research-info-systems`
    /// - `bib`  (both)   `.bib`
    /// - `endx` (input)  `.xml`, `application/xml`
    /// - `mods` (both)   `.xml`, `.mods`, `application/mods+xml`, `application/xml`
    /// - `ads`  (output) no extension
    pub fn test_catalog() -> FormatCatalog {
        FormatCatalog::new(vec![
            FormatDescriptor::new("ris", "RIS", Direction::Both)
                .with_extensions(&[".ris"])
                .with_mime_types(&["application/x-research-info-systems"]),
            FormatDescriptor::new("bib", "BibTeX", Direction::Both).with_extensions(&[".bib"]),
            FormatDescriptor::new("endx", "EndNote XML", Direction::Input)
                .with_extensions(&[".xml"])
                .with_mime_types(&["application/xml"]),
            FormatDescriptor::new("mods", "MODS", Direction::Both)
                .with_extensions(&[".xml", ".mods"])
                .with_mime_types(&["application/mods+xml", "application/xml"]),
            FormatDescriptor::new("ads", "ADS Tagged", Direction::Output),
        ])
        .expect("test catalog is valid")
    }
}
