//! Configuration loading and management for smartreader.
//!
//! Loads settings from `smartreader.toml` with an environment variable override
//! for the backend address. Every setting has a default, so a missing file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable overriding `api.url`
pub const API_URL_ENV: &str = "SMARTREADER_API_URL";

const CONFIG_FILE: &str = "smartreader.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid API URL {url:?}: {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API, e.g. `http://localhost:5001/api`
    pub url: String,
    /// Per-request timeout in seconds. Summarisation can be slow.
    pub timeout_secs: u64,
}

/// Readiness polling intervals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay before re-checking a server that reports "initializing"
    pub initializing_secs: u64,
    /// Delay before re-checking an unreachable server
    pub offline_secs: u64,
}

/// Settings for share links
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Web front end that serves `/summary/<id>` pages
    pub web_url: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

impl Config {
    /// Load configuration from the default location (smartreader.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::load_from(&path)?,
            None => Config::default(),
        };
        config.apply_env();
        config.api_url()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Override settings from environment variables
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.url = url;
            }
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        let home_config = dirs::home_dir()?
            .join(".config")
            .join("smartreader")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }

    /// The parsed backend base URL
    pub fn api_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.api.url.trim()).map_err(|source| ConfigError::InvalidApiUrl {
            url: self.api.url.clone(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5001/api".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initializing_secs: 10,
            offline_secs: 30,
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            web_url: "http://localhost:3000".to_string(),
        }
    }
}
