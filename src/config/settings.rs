//! TOML-based configuration.
//!
//! Example configuration:
//! ```toml
//! [inference]
//! enabled = true
//! singularization = "naive"   # or "inflector"
//! prefer_key_pattern = false
//!
//! [cache]
//! enabled = true
//! ttl_seconds = 3600
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::inference::Singularization;
use crate::model::CachePolicy;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "METRIC_SCHEMA_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Join inference configuration.
    pub inference: InferenceSettings,

    /// Default cache policy for new schemas.
    pub cache: CacheSettings,
}

/// Join inference settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceSettings {
    /// Run inference when the set of used tables changes.
    pub enabled: bool,

    /// Table-name singularization for `<table>_id` matching.
    pub singularization: Singularization,

    /// Rank `id` / `<table>_id` matches before same-name matches.
    pub prefer_key_pattern: bool,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            singularization: Singularization::Naive,
            prefer_key_pattern: false,
        }
    }
}

/// Cache defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 3600,
        }
    }
}

impl CacheSettings {
    pub fn to_policy(&self) -> CachePolicy {
        CachePolicy {
            enabled: self.enabled,
            ttl_seconds: self.ttl_seconds,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `METRIC_SCHEMA_CONFIG`
    /// 2. `./metric-schema.toml`
    /// 3. `~/.config/metric-schema/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("metric-schema.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("metric-schema").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}
