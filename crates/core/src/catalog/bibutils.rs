//! Formats handled by the bibutils tool suite.
//!
//! Ids follow the bibutils naming (`bibtex`, `end`, `med`, ...). MODS XML is
//! the hub format every bibutils conversion goes through.

use super::types::{Direction, FormatDescriptor};

pub(super) fn descriptors() -> Vec<FormatDescriptor> {
    vec![
        FormatDescriptor::new("ris", "RIS", Direction::Both)
            .with_extensions(&[".ris"])
            .with_mime_types(&["application/x-research-info-systems"]),
        FormatDescriptor::new("bibtex", "BibTeX", Direction::Both)
            .with_extensions(&[".bib", ".bibtex"])
            .with_mime_types(&["application/x-bibtex", "text/x-bibtex"]),
        FormatDescriptor::new("biblatex", "BibLaTeX", Direction::Input)
            .with_extensions(&[".bib"])
            .with_mime_types(&["application/x-bibtex"]),
        FormatDescriptor::new("end", "EndNote (Refer)", Direction::Both)
            .with_extensions(&[".enw", ".end", ".refer"])
            .with_mime_types(&["application/x-endnote-refer"]),
        FormatDescriptor::new("endx", "EndNote XML", Direction::Input)
            .with_extensions(&[".xml"])
            .with_mime_types(&["application/xml", "text/xml"]),
        FormatDescriptor::new("mods", "MODS XML", Direction::Both)
            .with_extensions(&[".xml", ".mods"])
            .with_mime_types(&["application/mods+xml", "application/xml", "text/xml"]),
        FormatDescriptor::new("med", "MEDLINE XML", Direction::Input)
            .with_extensions(&[".xml"])
            .with_mime_types(&["application/xml", "text/xml"]),
        FormatDescriptor::new("nbib", "PubMed (NBIB)", Direction::Both)
            .with_extensions(&[".nbib"])
            .with_mime_types(&["application/nbib", "application/x-nbib"]),
        FormatDescriptor::new("isi", "ISI Web of Science", Direction::Both)
            .with_extensions(&[".isi", ".ciw"])
            .with_mime_types(&["application/x-inst-for-scientific-info"]),
        FormatDescriptor::new("wordbib", "Word 2007 Bibliography", Direction::Both)
            .with_extensions(&[".xml"])
            .with_mime_types(&["application/xml", "text/xml"]),
        FormatDescriptor::new("ebi", "EBI XML", Direction::Input)
            .with_extensions(&[".xml"])
            .with_mime_types(&["application/xml", "text/xml"]),
        FormatDescriptor::new("copac", "COPAC", Direction::Input)
            .with_extensions(&[".copac"]),
        FormatDescriptor::new("ads", "ADS Tagged", Direction::Output),
    ]
}
