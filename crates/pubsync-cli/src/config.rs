//! Endpoint configuration from TOML files

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for pubsync.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub zbmath: ZbMathConfig,
    pub citation: CitationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZbMathConfig {
    pub base_url: String,
}

impl Default for ZbMathConfig {
    fn default() -> Self {
        Self {
            base_url: pubsync_zbmath::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CitationConfig {
    pub resolver_url: String,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            resolver_url: pubsync_zbmath::DEFAULT_RESOLVER_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Search order:
    /// 1. ./pubsync.toml (current directory)
    /// 2. ~/.config/pubsync/config.toml
    ///
    /// If no config file is found, defaults are used.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("pubsync.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "pubsync") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}
