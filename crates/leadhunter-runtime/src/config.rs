//! Runtime configuration.
//!
//! Every section has defaults, so an empty YAML document is a valid
//! configuration. Durations are written in human form (`12s`, `500ms`).
//! Credentials never live here, see [`crate::providers::Credentials`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use leadhunter_core::{MAX_TEXT_CHARS, MAX_TITLE_CHARS, MAX_URLS};

/// User agent sent with every page fetch.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) LeadHunterAI/0.2";

/// Bing Web Search v7 endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Page fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    #[serde(with = "humantime_duration")]
    pub timeout: Duration,
    pub user_agent: String,
    pub max_title_chars: usize,
    pub max_text_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(12),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_title_chars: MAX_TITLE_CHARS,
            max_text_chars: MAX_TEXT_CHARS,
        }
    }
}

/// Web search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub market: String,
    pub max_results: usize,
    #[serde(with = "humantime_duration")]
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            market: "en-US".to_string(),
            max_results: 6,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Language model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    #[serde(with = "humantime_duration")]
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: crate::providers::DEFAULT_OPENAI_BASE_URL.to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.2,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub fetch: FetchConfig,
    pub search: SearchConfig,
    pub model: ModelConfig,
    pub max_urls: usize,
    pub history_path: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            search: SearchConfig::default(),
            model: ModelConfig::default(),
            max_urls: MAX_URLS,
            history_path: PathBuf::from("history.csv"),
        }
    }
}

impl RuntimeConfig {
    /// Parse a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RuntimeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_urls == 0 {
            return Err(ConfigError::Invalid("max_urls must be at least 1".to_string()));
        }
        if self.max_urls > MAX_URLS {
            return Err(ConfigError::Invalid(format!("max_urls must be at most {}", MAX_URLS)));
        }

        for (field, value, max) in [
            ("fetch.max_title_chars", self.fetch.max_title_chars, MAX_TITLE_CHARS),
            ("fetch.max_text_chars", self.fetch.max_text_chars, MAX_TEXT_CHARS),
        ] {
            if value > max {
                return Err(ConfigError::Invalid(format!("{} must be at most {}", field, max)));
            }
        }

        for (field, url) in [
            ("search.endpoint", &self.search.endpoint),
            ("model.base_url", &self.model.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{} must start with http:// or https://",
                    field
                )));
            }
        }

        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::Invalid(
                "model.temperature must be between 0 and 2".to_string(),
            ));
        }

        Ok(())
    }
}

mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}
