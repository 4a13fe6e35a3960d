use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/complexapp/config.toml` on Unix/macOS, or the
    /// equivalent via `dirs::config_dir()`. Falls back to the current directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("complexapp").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `server.base_url` is an http(s) URL
    /// - `server.chat_url` is a ws(s) URL
    /// - `search.debounce_ms` is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scheme("server.base_url", &self.server.base_url, &["http", "https"])?;
        check_scheme("server.chat_url", &self.server.chat_url, &["ws", "wss"])?;

        if self.search.debounce_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "search.debounce_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

fn check_scheme(field: &str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        message: format!("{field} '{value}' is not a valid URL: {e}"),
    })?;
    if !allowed.contains(&url.scheme()) {
        return Err(ConfigError::ValidationError {
            message: format!(
                "{field} must use one of {:?}, got '{}'",
                allowed,
                url.scheme()
            ),
        });
    }
    Ok(())
}
