use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Engine timeout is not 0
/// - Remote base URL parses and the user agent is set
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.engine.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "engine.timeout_secs cannot be 0".to_string(),
        ));
    }

    reqwest::Url::parse(&config.remote.base_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "remote.base_url {:?} is not a valid URL: {}",
            config.remote.base_url, e
        ))
    })?;

    if config.remote.user_agent.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "remote.user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse().unwrap(),
                port: 0,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_zero_engine_timeout_fails() {
        let mut config = Config::default();
        config.engine.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_base_url_fails() {
        let mut config = Config::default();
        config.remote.base_url = "not a url".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("remote.base_url"));
    }

    #[test]
    fn test_validate_empty_user_agent_fails() {
        let mut config = Config::default();
        config.remote.user_agent = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
