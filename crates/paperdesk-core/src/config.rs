//! Settings for the paperdesk core
//!
//! Settings load from a TOML file; a few environment variables override file
//! values so API keys can stay out of config files:
//!
//! - `PAPERDESK_STORAGE_DIR`
//! - `PAPERDESK_API_KEY`
//! - `PAPERDESK_MODEL`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// System-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the library file and cached article copies
    pub storage_dir: PathBuf,
    pub summarizer: SummarizerSettings,
}

/// Summarization service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Which summarization backend to talk to; only "openai" (any
    /// OpenAI-compatible endpoint) is currently implemented
    pub provider: String,
    /// Base URL of an OpenAI-compatible API
    pub api_base: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Language the summaries should be written in
    pub language: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            summarizer: SummarizerSettings::default(),
        }
    }
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            language: "English".to_string(),
            max_tokens: 1000,
            temperature: 0.3,
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paperdesk")
}

impl Settings {
    /// Load settings from a TOML file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("PAPERDESK_STORAGE_DIR") {
            self.storage_dir = PathBuf::from(dir);
        }
        if let Ok(key) = std::env::var("PAPERDESK_API_KEY") {
            self.summarizer.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("PAPERDESK_MODEL") {
            self.summarizer.model = model;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.summarizer.provider != "openai" {
            return Err(ConfigError::Invalid(format!(
                "unknown summarizer.provider '{}'",
                self.summarizer.provider
            )));
        }
        if self.summarizer.model.is_empty() {
            return Err(ConfigError::Invalid(
                "summarizer.model must not be empty".to_string(),
            ));
        }
        if self.summarizer.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "summarizer.max_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
