//! Configuration handling for todo-notes
//!
//! Configuration is read from `config.toml` in the platform config directory
//! (`~/.config/todo-notes/config.toml` on Linux) or from an explicit path.
//! Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::StatusFilter;

/// Endpoint returning `{"todo": "..."}` with a random suggestion
pub const DEFAULT_SUGGESTION_ENDPOINT: &str = "https://dummyjson.com/todos/random";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Settings for the suggestion fetcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// URL queried for a random suggestion
    pub endpoint: String,

    /// Request timeout in seconds (unset waits indefinitely)
    pub timeout_secs: Option<u64>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SUGGESTION_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

/// Settings for the terminal UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll interval in milliseconds
    pub tick_rate_ms: u64,

    /// Status filter selected at startup
    pub default_filter: StatusFilter,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            default_filter: StatusFilter::All,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the saved tasks and theme
    pub data_dir: Option<PathBuf>,

    pub suggestion: SuggestionConfig,

    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let config = Self::parse(&content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.suggestion.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "suggestion.endpoint must not be empty".to_string(),
            ));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "ui.tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "todo-notes", "todo-notes")
    }

    /// Returns the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolves the data directory: explicit override, then config, then platform default
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory; pass --data-dir"))
    }
}
