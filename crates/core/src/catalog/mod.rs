//! Format catalog.
//!
//! The catalog is the single authoritative list of bibliographic formats the
//! service knows about. It is built once at startup from a list of
//! [`FormatDescriptor`]s and is read-only afterwards, so it can be shared
//! between requests behind an `Arc` without any locking.
//!
//! Two lookup directions are derived from the descriptor list at build time:
//!
//! - id -> descriptor
//! - extension / MIME type -> candidate format ids
//!
//! A single extension or MIME type may map to several formats (`.xml` is the
//! usual suspect). Candidate lists keep the order in which the formats were
//! declared.

mod bibutils;
mod types;

pub use types::{Direction, FormatDescriptor, FormatId};

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

/// Extension used for exports when a format declares none.
pub const FALLBACK_EXPORT_EXTENSION: &str = ".txt";

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate format id: {0}")]
    DuplicateFormat(FormatId),

    #[error("Duplicate format label: {0}")]
    DuplicateLabel(String),

    #[error("Format {0} has an empty label")]
    EmptyLabel(FormatId),

    #[error(
        "Invalid extension {extension:?} for format {format} \
         (expected lowercase with a leading dot)"
    )]
    InvalidExtension { format: FormatId, extension: String },

    #[error("Invalid MIME type {mime_type:?} for format {format}")]
    InvalidMimeType { format: FormatId, mime_type: String },
}

/// The process-wide, immutable set of known formats.
#[derive(Debug, Clone)]
pub struct FormatCatalog {
    descriptors: Vec<FormatDescriptor>,
    by_id: HashMap<FormatId, usize>,
    by_extension: HashMap<String, Vec<FormatId>>,
    by_mime_type: HashMap<String, Vec<FormatId>>,
}

impl FormatCatalog {
    /// Builds a catalog from its descriptor list.
    pub fn new(descriptors: Vec<FormatDescriptor>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(descriptors.len());
        let mut labels = HashSet::with_capacity(descriptors.len());
        let mut by_extension: HashMap<String, Vec<FormatId>> = HashMap::new();
        let mut by_mime_type: HashMap<String, Vec<FormatId>> = HashMap::new();

        for (index, descriptor) in descriptors.iter().enumerate() {
            if by_id.insert(descriptor.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateFormat(descriptor.id.clone()));
            }

            if descriptor.label.trim().is_empty() {
                return Err(CatalogError::EmptyLabel(descriptor.id.clone()));
            }
            if !labels.insert(descriptor.label.as_str()) {
                return Err(CatalogError::DuplicateLabel(descriptor.label.clone()));
            }

            for extension in &descriptor.extensions {
                if !is_valid_extension(extension) {
                    return Err(CatalogError::InvalidExtension {
                        format: descriptor.id.clone(),
                        extension: extension.clone(),
                    });
                }
                push_unique(&mut by_extension, extension.clone(), &descriptor.id);
            }

            for mime_type in &descriptor.mime_types {
                if !is_valid_mime_type(mime_type) {
                    return Err(CatalogError::InvalidMimeType {
                        format: descriptor.id.clone(),
                        mime_type: mime_type.clone(),
                    });
                }
                push_unique(&mut by_mime_type, mime_type.to_ascii_lowercase(), &descriptor.id);
            }
        }

        Ok(Self {
            descriptors,
            by_id,
            by_extension,
            by_mime_type,
        })
    }

    /// The built-in catalog of formats understood by the bibutils tool suite.
    pub fn bibutils() -> Self {
        Self::new(bibutils::descriptors()).expect("built-in bibutils catalog is valid")
    }

    /// All descriptors, in declaration order.
    pub fn descriptors(&self) -> &[FormatDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FormatDescriptor> {
        self.by_id.get(id).map(|&index| &self.descriptors[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Formats valid as a conversion source.
    pub fn sources(&self) -> impl Iterator<Item = &FormatDescriptor> {
        self.descriptors.iter().filter(|d| d.direction.is_source())
    }

    /// Formats valid as a conversion target.
    pub fn targets(&self) -> impl Iterator<Item = &FormatDescriptor> {
        self.descriptors.iter().filter(|d| d.direction.is_target())
    }

    /// Formats declaring `extension` (lowercase, with leading dot).
    pub fn formats_for_extension(&self, extension: &str) -> &[FormatId] {
        self.by_extension
            .get(extension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Formats declaring `mime_type` (compared case-insensitively).
    pub fn formats_for_mime_type(&self, mime_type: &str) -> &[FormatId] {
        self.by_mime_type
            .get(&mime_type.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// File extension to use when exporting output in format `id`.
    ///
    /// Picks the first extension the format declares, falling back to
    /// [`FALLBACK_EXPORT_EXTENSION`].
    pub fn export_extension(&self, id: &str) -> &str {
        self.get(id)
            .and_then(|d| d.extensions.first())
            .map(String::as_str)
            .unwrap_or(FALLBACK_EXPORT_EXTENSION)
    }

    /// Snapshot of the catalog in the shape served by `GET /api/formats`.
    pub fn dump(&self) -> CatalogDump {
        CatalogDump {
            human: HumanFormats {
                from: labels(self.sources()),
                to: labels(self.targets()),
            },
            extension: self
                .by_extension
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            mimetype: self
                .by_mime_type
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Serializable catalog dump for client-side selectors and sniffing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogDump {
    pub human: HumanFormats,
    pub extension: BTreeMap<String, Vec<FormatId>>,
    pub mimetype: BTreeMap<String, Vec<FormatId>>,
}

/// Human-readable labels keyed to format ids, split by direction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HumanFormats {
    pub from: BTreeMap<String, FormatId>,
    pub to: BTreeMap<String, FormatId>,
}

fn labels<'a>(
    descriptors: impl Iterator<Item = &'a FormatDescriptor>,
) -> BTreeMap<String, FormatId> {
    descriptors
        .map(|d| (d.label.clone(), d.id.clone()))
        .collect()
}

fn push_unique(map: &mut HashMap<String, Vec<FormatId>>, key: String, id: &FormatId) {
    let ids = map.entry(key).or_default();
    if !ids.contains(id) {
        ids.push(id.clone());
    }
}

fn is_valid_extension(extension: &str) -> bool {
    extension.len() > 1
        && extension.starts_with('.')
        && !extension[1..].contains('.')
        && extension == extension.to_ascii_lowercase()
}

fn is_valid_mime_type(mime_type: &str) -> bool {
    match mime_type.split_once('/') {
        Some((kind, subtype)) => !kind.is_empty() && !subtype.is_empty(),
        None => false,
    }
}
