//! Configuration management for Playbox

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::gallery::Size;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "PLAYBOX_CONFIG";

/// Environment variable overriding the Flickr api key
pub const API_KEY_ENV: &str = "PLAYBOX_FLICKR_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub flickr: FlickrConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickrConfig {
    /// Inline api key. Prefer `api_key_file` or the environment variable.
    pub api_key: Option<String>,
    /// File holding the api key on its first line
    pub api_key_file: Option<String>,
    pub base_url: String,
    /// Request timeout in humantime form ("10s"); transport default when unset
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub default_tag: String,
    pub per_page: u32,
    pub size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub sample_interval: String,
    pub emit_interval: String,
}

impl Default for FlickrConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_file: None,
            base_url: "https://api.flickr.com/".to_string(),
            timeout: None,
        }
    }
}

// Hand-written so the inline key never reaches a log line
impl std::fmt::Debug for FlickrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlickrConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_file", &self.api_key_file)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default_tag: "NASA".to_string(),
            per_page: 50,
            size: Size::default().suffix().to_string(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            sample_interval: "100ms".to_string(),
            emit_interval: "200ms".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

impl FlickrConfig {
    /// Resolve the api key
    ///
    /// Order: `PLAYBOX_FLICKR_API_KEY`, inline `api_key`, then `api_key_file`.
    pub fn api_key(&self) -> Result<SecretString> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            let key = key.trim();
            if !key.is_empty() {
                return Ok(SecretString::from(key.to_string()));
            }
        }

        if let Some(ref key) = self.api_key {
            if !key.trim().is_empty() {
                return Ok(SecretString::from(key.trim().to_string()));
            }
        }

        if let Some(ref file) = self.api_key_file {
            let path = shellexpand::tilde(file).to_string();
            let content = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
            let key = content.lines().next().unwrap_or("").trim();
            if !key.is_empty() {
                return Ok(SecretString::from(key.to_string()));
            }
        }

        Err(ConfigError::MissingField("flickr.api_key".to_string()).into())
    }

    pub fn timeout(&self) -> Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|value| parse_interval("flickr.timeout", value))
            .transpose()
    }
}

impl GalleryConfig {
    pub fn size(&self) -> Result<Size> {
        self.size.parse().map_err(|reason| {
            ConfigError::InvalidValue {
                field: "gallery.size".to_string(),
                reason,
            }
            .into()
        })
    }
}

impl ClockConfig {
    pub fn sample_interval(&self) -> Result<Duration> {
        parse_interval("clock.sample_interval", &self.sample_interval)
    }

    pub fn emit_interval(&self) -> Result<Duration> {
        parse_interval("clock.emit_interval", &self.emit_interval)
    }
}

fn parse_interval(field: &str, value: &str) -> Result<Duration> {
    let duration = humantime::parse_duration(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: e.to_string(),
    })?;

    if duration.is_zero() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be greater than zero".to_string(),
        }
        .into());
    }

    Ok(duration)
}

/// Resolve the configuration file path following XDG Base Directory conventions
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("playbox").join("config.toml"))
}
