//! Format sniffing from a file name and/or MIME type.
//!
//! Resolution never inspects file content. The extension is the stronger
//! signal: whenever it is recognized, the MIME type is ignored. An
//! unrecognized (or missing) extension falls back to the MIME type, and when
//! neither matches the result is simply empty.

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::{FormatCatalog, FormatId};

/// What produced a set of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Extension,
    MimeType,
    None,
}

/// Candidate formats, most confident first.
///
/// Several candidates mean the signature is ambiguous; callers decide how to
/// present that (typically preselect [`ResolvedFormats::preferred`] and let
/// the user override it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFormats {
    candidates: Vec<FormatId>,
    source: MatchSource,
}

impl ResolvedFormats {
    fn new(candidates: &[FormatId], source: MatchSource) -> Self {
        Self {
            candidates: candidates.to_vec(),
            source,
        }
    }

    fn none() -> Self {
        Self {
            candidates: Vec::new(),
            source: MatchSource::None,
        }
    }

    pub fn candidates(&self) -> &[FormatId] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<FormatId> {
        self.candidates
    }

    pub fn preferred(&self) -> Option<&FormatId> {
        self.candidates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }

    pub fn source(&self) -> MatchSource {
        self.source
    }
}

/// Resolves file signatures against a catalog.
#[derive(Debug, Clone)]
pub struct FormatResolver {
    catalog: Arc<FormatCatalog>,
}

impl FormatResolver {
    pub fn new(catalog: Arc<FormatCatalog>) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, filename: Option<&str>, mime_type: Option<&str>) -> ResolvedFormats {
        if let Some(extension) = filename.and_then(file_extension) {
            let candidates = self.catalog.formats_for_extension(&extension);
            if !candidates.is_empty() {
                return ResolvedFormats::new(candidates, MatchSource::Extension);
            }
        }

        if let Some(essence) = mime_type.and_then(mime_essence) {
            let candidates = self.catalog.formats_for_mime_type(essence);
            if !candidates.is_empty() {
                return ResolvedFormats::new(candidates, MatchSource::MimeType);
            }
        }

        ResolvedFormats::none()
    }
}

/// Lowercased extension of `filename` with a leading dot.
///
/// Names whose only dot is the leading one (`.bib`) have no extension.
pub fn file_extension(filename: &str) -> Option<String> {
    let extension = Path::new(filename.trim()).extension()?.to_str()?;
    if extension.is_empty() {
        return None;
    }
    Some(format!(".{}", extension.to_ascii_lowercase()))
}

/// MIME type without parameters (`text/plain; charset=utf-8` -> `text/plain`).
fn mime_essence(mime_type: &str) -> Option<&str> {
    let essence = mime_type.split(';').next()?.trim();
    (!essence.is_empty()).then_some(essence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Direction, FormatDescriptor};

    fn resolver() -> FormatResolver {
        let catalog = FormatCatalog::new(vec![
            FormatDescriptor::new("ris", "RIS", Direction::Both)
                .with_extensions(&[".ris"])
                .with_mime_types(&["application/x-research-info-systems"]),
            FormatDescriptor::new("bib", "BibTeX", Direction::Both).with_extensions(&[".bib"]),
            FormatDescriptor::new("endx", "EndNote XML", Direction::Input)
                .with_extensions(&[".xml"])
                .with_mime_types(&["text/xml"]),
            FormatDescriptor::new("mods", "MODS", Direction::Both)
                .with_extensions(&[".xml"])
                .with_mime_types(&["text/xml"]),
        ])
        .unwrap();
        FormatResolver::new(Arc::new(catalog))
    }

    fn ids(resolved: &ResolvedFormats) -> Vec<&str> {
        resolved.candidates().iter().map(FormatId::as_str).collect()
    }

    #[test]
    fn test_extension_beats_mime_type() {
        let resolved = resolver().resolve(Some("paper.ris"), Some("text/plain"));
        assert_eq!(ids(&resolved), vec!["ris"]);
        assert_eq!(resolved.source(), MatchSource::Extension);
    }

    #[test]
    fn test_extension_beats_matching_mime_type() {
        let resolved =
            resolver().resolve(Some("refs.bib"), Some("application/x-research-info-systems"));
        assert_eq!(ids(&resolved), vec!["bib"]);
    }

    #[test]
    fn test_mime_type_only() {
        let resolved = resolver().resolve(None, Some("application/x-research-info-systems"));
        assert_eq!(ids(&resolved), vec!["ris"]);
        assert_eq!(resolved.source(), MatchSource::MimeType);
    }

    #[test]
    fn test_unknown_extension_falls_back_to_mime_type() {
        let resolved = resolver().resolve(
            Some("paper.unknownext"),
            Some("application/x-research-info-systems"),
        );
        assert_eq!(ids(&resolved), vec!["ris"]);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let resolved = resolver().resolve(Some("PAPER.RIS"), None);
        assert_eq!(ids(&resolved), vec!["ris"]);
    }

    #[test]
    fn test_mime_parameters_are_ignored() {
        let resolved = resolver().resolve(
            None,
            Some("application/x-research-info-systems; charset=utf-8"),
        );
        assert_eq!(ids(&resolved), vec!["ris"]);
    }

    #[test]
    fn test_nothing_matches() {
        let r = resolver();
        assert!(r.resolve(None, None).is_empty());
        assert!(r.resolve(Some("paper.unknownext"), None).is_empty());
        assert!(r.resolve(Some("README"), None).is_empty());
        assert!(r.resolve(Some("paper.txt"), Some("text/plain")).is_empty());
        assert_eq!(r.resolve(None, None).source(), MatchSource::None);
    }

    #[test]
    fn test_ambiguous_extension_returns_all_candidates() {
        let resolved = resolver().resolve(Some("export.xml"), None);
        assert_eq!(ids(&resolved), vec!["endx", "mods"]);
        assert!(resolved.is_ambiguous());
        assert_eq!(resolved.preferred().unwrap().as_str(), "endx");
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("paper.RIS").as_deref(), Some(".ris"));
        assert_eq!(file_extension("dir/archive.tar.gz").as_deref(), Some(".gz"));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".bib"), None);
        assert_eq!(file_extension("paper."), None);
        assert_eq!(file_extension(""), None);
    }
}
