use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Environment variable that overrides `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "HOTEL_ADMIN_BACKEND_URL";

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
    /// Uses `~/.config/hotel-admin/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("hotel-admin").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, starts from `Config::default()`.
    /// - If the file exists, parses it as TOML.
    /// - Applies the `HOTEL_ADMIN_BACKEND_URL` override, then validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.backend.base_url = url.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The backend URL is an absolute http(s) URL
    /// - Timeouts are non-zero
    /// - The relay bind address parses as a socket address
    /// - Scroll threshold lies within 0.0..=1.0 and the margin is not negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.backend.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("backend.base_url must be an http(s) URL, got '{}'", url),
            });
        }

        if self.backend.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "backend.timeout_seconds must be greater than zero".to_string(),
            });
        }

        if self.relay.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("relay.bind_addr '{}' is not a valid address", self.relay.bind_addr),
            });
        }

        let threshold = self.scroll.visibility_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ValidationError {
                message: format!("scroll.visibility_threshold must be within 0..=1, got {}", threshold),
            });
        }

        if self.scroll.prefetch_margin_px < 0.0 {
            return Err(ConfigError::ValidationError {
                message: "scroll.prefetch_margin_px must not be negative".to_string(),
            });
        }

        Ok(())
    }
}
