//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::client::Client;
use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::error::ApiError;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    Client(ApiError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::Client(e) => write!(f, "Client error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
///
/// Emits nothing: the log level usually comes from this file, so callers
/// log the load once their subscriber is installed.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Build a reqwest-backed client from a validated configuration.
pub fn build_client(config: ClientConfig) -> Result<Client, ConfigError> {
    let (url, options) = config.into_parts();
    Client::new(url, options).map_err(ConfigError::Client)
}
