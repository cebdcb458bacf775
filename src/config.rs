//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every field has a compiled-in default so the binary runs with no
//! config file present.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub explorer: ExplorerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            explorer: ExplorerConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { enabled: true, port: 8600 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Padding applied when a request doesn't specify one.
    pub default_padding: u32,
    /// Hard cap on request padding; sweep cost is O(bound).
    pub max_padding: u32,
    pub label_a: String,
    pub label_b: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_padding: 4,
            max_padding: 200,
            label_a: "Side A".to_string(),
            label_b: "Side B".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is
    /// absent. A file that exists but doesn't parse is still an error.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
