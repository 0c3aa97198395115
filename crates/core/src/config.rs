//! Configuration
//!
//! Loaded from a TOML file with every field optional, then overridden by a
//! few environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

use crate::errors::CoreError;
use crate::storage::document::DEFAULT_DOCUMENT_PATH;
use crate::storage::firebase::DEFAULT_TIMEOUT_SECS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which document store backs the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Firebase Realtime Database over REST
    #[default]
    Firebase,
    /// JSON file on local disk
    File,
    /// Nothing persisted beyond the session
    Memory,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Base URL of the realtime database, e.g. `https://my-app.firebaseio.com`
    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_document_path")]
    pub document_path: String,

    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,
}

fn default_document_path() -> String {
    DEFAULT_DOCUMENT_PATH.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_file_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("spend-tracker"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("state.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database_url: String::new(),
            document_path: default_document_path(),
            auth_token: None,
            request_timeout_secs: default_request_timeout(),
            file_path: default_file_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TrackerConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let config: TrackerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a file, apply environment overrides, then validate the result.
    pub fn load_with_env(path: &Path) -> Result<Self, CoreError> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from the first config file found in the standard locations,
    /// falling back to defaults, then apply environment overrides.
    pub fn load_default() -> Result<Self, CoreError> {
        let candidates = [
            dirs::config_dir().map(|p| p.join("spend-tracker").join("config.toml")),
            Some(PathBuf::from("./spend-tracker.toml")),
        ];

        match candidates.into_iter().flatten().find(|p| p.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::load_with_env(&path)
            }
            None => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Apply `SPEND_TRACKER_*` environment variables on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SPEND_TRACKER_DATABASE_URL") {
            self.store.database_url = url;
        }
        if let Ok(token) = std::env::var("SPEND_TRACKER_AUTH_TOKEN") {
            self.store.auth_token = Some(token);
        }
        if let Ok(level) = std::env::var("SPEND_TRACKER_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Reject settings no store could work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.store.backend == StoreBackend::Firebase {
            let url = self.store.database_url.trim();
            if url.is_empty() {
                return Err(CoreError::Config(
                    "store.database_url is required for the firebase backend".into(),
                ));
            }
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(CoreError::Config(format!(
                    "store.database_url must be an http(s) URL, got '{url}'"
                )));
            }
            if self.store.request_timeout_secs == 0 {
                return Err(CoreError::Config(
                    "store.request_timeout_secs must be greater than 0".into(),
                ));
            }
        }
        if self.store.document_path.trim_matches('/').is_empty() {
            return Err(CoreError::Config("store.document_path must not be empty".into()));
        }
        if self.logging.level.parse::<LevelFilter>().is_err() {
            return Err(CoreError::Config(format!(
                "logging.level must be one of off, error, warn, info, debug, trace, got '{}'",
                self.logging.level
            )));
        }
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(CoreError::Config(format!(
                "logging.format must be 'text' or 'json', got '{other}'"
            ))),
        }
    }
}
