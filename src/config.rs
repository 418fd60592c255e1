use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_api_url() -> String {
    api::MODELS_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_check_retries")]
    pub retries: u32,
    #[serde(default = "default_check_delay")]
    pub delay_seconds: u64,
    #[serde(default = "default_check_timeout")]
    pub timeout_seconds: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            url: None,
            retries: default_check_retries(),
            delay_seconds: default_check_delay(),
            timeout_seconds: default_check_timeout(),
        }
    }
}

fn default_check_retries() -> u32 {
    20
}

fn default_check_delay() -> u64 {
    15
}

fn default_check_timeout() -> u64 {
    10
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("freemodels").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.url, api::MODELS_URL);
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.check.retries, 20);
        assert_eq!(config.check.delay_seconds, 15);
        assert_eq!(config.check.timeout_seconds, 10);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[api]\nurl = \"http://localhost:9/models\"\n").unwrap();
        assert_eq!(config.api.url, "http://localhost:9/models");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.check.retries, 20);
    }
}
