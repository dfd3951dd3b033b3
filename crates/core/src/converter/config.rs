//! Configuration for the bibutils conversion engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for [`BibutilsEngine`](super::BibutilsEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the bibutils tools. When unset the tools are looked
    /// up on `PATH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_dir: Option<PathBuf>,

    /// Timeout for a single conversion in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Extra arguments passed to every `<format>2xml` reader.
    #[serde(default)]
    pub reader_args: Vec<String>,

    /// Extra arguments passed to every `xml2<format>` writer.
    #[serde(default)]
    pub writer_args: Vec<String>,
}

fn default_timeout() -> u64 {
    60
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bin_dir: None,
            timeout_secs: default_timeout(),
            reader_args: Vec::new(),
            writer_args: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Creates a config that looks for the tools in `bin_dir`.
    pub fn with_bin_dir(bin_dir: PathBuf) -> Self {
        Self {
            bin_dir: Some(bin_dir),
            ..Default::default()
        }
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Resolves the path of a bibutils tool.
    pub fn program(&self, name: &str) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.bin_dir.is_none());
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.program("ris2xml"), PathBuf::from("ris2xml"));
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::with_bin_dir(PathBuf::from("/opt/bibutils/bin")).with_timeout(5);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.program("xml2bib"),
            PathBuf::from("/opt/bibutils/bin/xml2bib")
        );
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.timeout_secs, 60);
        assert!(config.reader_args.is_empty());
        assert!(config.writer_args.is_empty());
    }
}
