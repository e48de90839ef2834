//! Top-level application configuration.
//!
//! Configuration is stored in `.pokejournal/config.yaml` and includes:
//! - The PokéAPI base URL
//! - Catalog page size and reveal size
//! - Detail view move cap
//! - HTTP timeouts

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DexError, Result};

/// Directory holding local state, relative to the working directory
pub const APP_DIR: &str = ".pokejournal";

/// Environment variable that overrides `api_url`
pub const API_URL_ENV: &str = "POKEJOURNAL_API_URL";

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Keys accepted by `config get` / `config set`
pub const VALID_KEYS: &[&str] = &[
    "api_url",
    "batch_size",
    "display_limit",
    "moves_limit",
    "request_timeout",
    "connect_timeout",
];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the PokéAPI (default: https://pokeapi.co/api/v2)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Listing entries requested per catalog page (default: 100)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Items revealed per "more" (default: 50)
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Level-up moves shown in a detail view (default: 30)
    #[serde(default = "default_moves_limit")]
    pub moves_limit: usize,

    /// Total request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_display_limit() -> usize {
    50
}

fn default_moves_limit() -> usize {
    30
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            batch_size: default_batch_size(),
            display_limit: default_display_limit(),
            moves_limit: default_moves_limit(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(APP_DIR).join("config.yaml")
    }

    /// Load configuration from the default location, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DexError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DexError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            DexError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    /// Check sizes, limits and the API URL
    pub fn validate(&self) -> Result<()> {
        parse_api_url(&self.api_url)?;
        for (key, value) in [
            ("batch_size", self.batch_size),
            ("display_limit", self.display_limit),
            ("moves_limit", self.moves_limit),
        ] {
            if value == 0 {
                return Err(DexError::Config(format!("{key} must be at least 1")));
            }
        }
        if self.request_timeout == 0 || self.connect_timeout == 0 {
            return Err(DexError::Config(
                "timeouts must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the API URL from the environment or the config file
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }

        self.api_url.clone()
    }

    /// Parsed API base, always ending in `/` so relative joins stay under it
    pub fn api_base(&self) -> Result<Url> {
        parse_api_url(&self.api_url())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Read a value by key
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "api_url" => self.api_url(),
            "batch_size" => self.batch_size.to_string(),
            "display_limit" => self.display_limit.to_string(),
            "moves_limit" => self.moves_limit.to_string(),
            "request_timeout" => self.request_timeout.to_string(),
            "connect_timeout" => self.connect_timeout.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a value by key, validating the result
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "api_url" => updated.api_url = value.trim().to_string(),
            "batch_size" => updated.batch_size = parse_number(key, value)?,
            "display_limit" => updated.display_limit = parse_number(key, value)?,
            "moves_limit" => updated.moves_limit = parse_number(key, value)?,
            "request_timeout" => updated.request_timeout = parse_number(key, value)?,
            "connect_timeout" => updated.connect_timeout = parse_number(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn unknown_key(key: &str) -> DexError {
    DexError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        VALID_KEYS.join(", ")
    ))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        DexError::Config(format!(
            "invalid value '{value}' for {key}. Expected a positive integer"
        ))
    })
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| DexError::Config(format!("invalid api_url '{raw}': {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(DexError::Config(format!(
            "invalid api_url '{raw}': expected an http or https URL"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
