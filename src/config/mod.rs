//! Configuration management for the stellium application.
//!
//! Loads settings from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `STELLIUM_DIR`: Path to the data directory holding the key-value store
//!   files (defaults to `~/.local/share/stellium`)
//! - `STELLIUM_API_URL`: Base URL of the horoscope API (defaults to the
//!   public aztro endpoint); tests point this at a local mock server

use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;

/// Default horoscope API endpoint.
pub const DEFAULT_API_URL: &str = "https://aztro.sameerkumar.website";

const DEFAULT_DATA_DIR: &str = "~/.local/share/stellium";

/// Application configuration.
///
/// # Examples
///
/// ```
/// use stellium::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/tmp/stellium"),
///     api_url: "http://127.0.0.1:8080".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted key-value store files.
    pub data_dir: PathBuf,

    /// Base URL of the horoscope API.
    pub api_url: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to the
    /// defaults. The data directory supports `~` expansion.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the data directory path cannot be
    /// expanded.
    pub fn load() -> AppResult<Self> {
        let raw_dir = env::var("STELLIUM_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let expanded = shellexpand::full(&raw_dir)
            .map_err(|e| AppError::Config(format!("Failed to expand data directory: {}", e)))?;
        let data_dir = PathBuf::from(expanded.as_ref());

        let api_url = env::var("STELLIUM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self { data_dir, api_url })
    }

    /// Validates the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the data directory path is relative
    /// or the API URL is not http(s).
    pub fn validate(&self) -> AppResult<()> {
        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(format!(
                "Data directory must be an absolute path, got: {}",
                self.data_dir.display()
            )));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Horoscope API URL must be an http(s) URL, got: {}",
                self.api_url
            )));
        }

        Ok(())
    }
}
