//! Catalog data types.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier of a bibliographic format (e.g. `ris`, `bibtex`).
///
/// Identifiers are case-sensitive and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatId(String);

impl FormatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormatId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FormatId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for FormatId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FormatId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which side of a conversion a format can appear on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Can only be read (conversion source).
    Input,
    /// Can only be written (conversion target).
    Output,
    /// Can be read and written.
    Both,
}

impl Direction {
    pub fn is_source(self) -> bool {
        matches!(self, Self::Input | Self::Both)
    }

    pub fn is_target(self) -> bool {
        matches!(self, Self::Output | Self::Both)
    }
}

/// One entry of the format catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    pub id: FormatId,
    /// Human-readable name shown in format selectors.
    pub label: String,
    /// Lowercase file extensions with a leading dot, most common first.
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub mime_types: Vec<String>,
    pub direction: Direction,
}

impl FormatDescriptor {
    /// Creates a descriptor with no extensions or MIME types.
    pub fn new(id: impl Into<FormatId>, label: impl Into<String>, direction: Direction) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            extensions: Vec::new(),
            mime_types: Vec::new(),
            direction,
        }
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_mime_types(mut self, mime_types: &[&str]) -> Self {
        self.mime_types = mime_types.iter().map(|m| m.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_direction_sides() {
        assert!(Direction::Input.is_source());
        assert!(!Direction::Input.is_target());
        assert!(!Direction::Output.is_source());
        assert!(Direction::Output.is_target());
        assert!(Direction::Both.is_source());
        assert!(Direction::Both.is_target());
    }

    #[test]
    fn test_format_id_is_case_sensitive() {
        assert_ne!(FormatId::from("ris"), FormatId::from("RIS"));
    }

    #[test]
    fn test_format_id_borrows_as_str() {
        let mut map = HashMap::new();
        map.insert(FormatId::from("ris"), 1);
        assert_eq!(map.get("ris"), Some(&1));
    }

    #[test]
    fn test_format_id_serializes_transparently() {
        let json = serde_json::to_string(&FormatId::from("bibtex")).unwrap();
        assert_eq!(json, "\"bibtex\"");
    }

    #[test]
    fn test_descriptor_deserialize_defaults() {
        let json = r#"{"id": "ads", "label": "ADS Tagged", "direction": "output"}"#;
        let descriptor: FormatDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.id.as_str(), "ads");
        assert!(descriptor.extensions.is_empty());
        assert!(descriptor.mime_types.is_empty());
        assert_eq!(descriptor.direction, Direction::Output);
    }
}
