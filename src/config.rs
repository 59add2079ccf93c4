//! Workspace configuration.
//!
//! A small TOML file configures the optional inference capability. When the
//! file or the `[inference]` section is absent the workspace still works in
//! full; task intake just uses the local parser.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Seconds before an inference call is abandoned in favor of the local
/// parser. Kept short: the fallback path guarantees forward progress.
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inference: Option<InferenceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Load from a TOML file; a missing file yields the default config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Build a config from the `GEMINI_API_KEY` environment variable.
    ///
    /// Returns the default (inference disabled) when the variable is unset
    /// or empty.
    pub fn from_env() -> Self {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => Self {
                inference: Some(InferenceConfig {
                    api_key: key,
                    model: default_model(),
                    endpoint: default_endpoint(),
                    timeout_secs: default_timeout_secs(),
                }),
            },
            _ => Self::default(),
        }
    }
}
