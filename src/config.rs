//! Configuration management for cmd-prompt.
//!
//! Handles loading prompt and logging settings from a TOML file. Every field
//! has a default, so a missing file is equivalent to an empty one.

use crate::commands::EmptyInputPolicy;
use crate::error::{PromptError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for cmd-prompt.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Prompt behaviour.
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Prompt behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptConfig {
    /// Text shown before each input line.
    #[serde(default = "default_prompt_text")]
    pub text: String,

    /// How blank input lines are treated.
    #[serde(default)]
    pub empty_input: EmptyInputPolicy,

    /// Answer unknown commands with a pointer to `help` instead of an error.
    #[serde(default)]
    pub unknown_hint: bool,
}

fn default_prompt_text() -> String {
    "Input a command: ".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            text: default_prompt_text(),
            empty_input: EmptyInputPolicy::default(),
            unknown_hint: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cmd-prompt")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PromptError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            PromptError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
