use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::converter::EngineConfig;
use crate::fetcher::PmcConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// bibutils engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Remote literature service (PubMed Central)
    #[serde(default)]
    pub remote: PmcConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Static UI bundle served for every non-API path
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default = "default_ui_dir")]
    pub dir: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dir: default_ui_dir(),
        }
    }
}

fn default_ui_dir() -> PathBuf {
    PathBuf::from("ui/dist")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.engine.timeout_secs, 60);
        assert!(config.engine.bin_dir.is_none());
        assert_eq!(config.remote.user_agent, "bibu");
        assert_eq!(config.ui.dir, PathBuf::from("ui/dist"));
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[engine]
bin_dir = "/usr/local/bin"
timeout_secs = 15
writer_args = ["-b"]

[remote]
base_url = "http://localhost:9117/pmc/"
user_agent = "bibu-test"
timeout_secs = 20

[ui]
dir = "/srv/bibu"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.engine.bin_dir, Some(PathBuf::from("/usr/local/bin")));
        assert_eq!(config.engine.timeout_secs, 15);
        assert_eq!(config.engine.writer_args, vec!["-b".to_string()]);
        assert_eq!(config.remote.base_url, "http://localhost:9117/pmc/");
        assert_eq!(config.remote.user_agent, "bibu-test");
        assert_eq!(config.remote.timeout_secs, Some(20));
        assert_eq!(config.ui.dir, PathBuf::from("/srv/bibu"));
    }

    #[test]
    fn test_serialize_roundtrip_keeps_sections() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["server"]["port"], 8080);
        assert_eq!(json["engine"]["timeout_secs"], 60);
        assert_eq!(json["remote"]["user_agent"], "bibu");
    }
}
