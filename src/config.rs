//! Configuration management for RouterChat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, RouterChatError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for RouterChat
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenRouter connection settings
    #[serde(default)]
    pub provider: OpenRouterConfig,

    /// Chat session settings
    #[serde(default)]
    pub chat: ChatConfig,

    /// Credential lookup settings
    #[serde(default)]
    pub credential: CredentialConfig,
}

/// OpenRouter provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API base URL; `/chat/completions` is appended to it
    ///
    /// Pointing this at a local mock server is how the integration tests
    /// exercise the provider.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Sampling temperature sent with every request; `null` omits the field
    #[serde(default = "default_temperature")]
    pub temperature: Option<f32>,

    /// Value of the informational `HTTP-Referer` header
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Value of the informational `X-Title` header
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_api_base() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_temperature() -> Option<f32> {
    Some(0.7)
}

fn default_referer() -> String {
    "http://localhost".to_string()
}

fn default_title() -> String {
    "RouterChat".to_string()
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_seconds: default_timeout_seconds(),
            temperature: default_temperature(),
            referer: default_referer(),
            title: default_title(),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatConfig {
    /// Display name of a model to preselect when a chat session starts
    #[serde(default)]
    pub default_model: Option<String>,
}

/// Credential lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Fall back to the OS keyring when `OPENROUTER_API_KEY` is unset
    #[serde(default = "default_use_keyring")]
    pub use_keyring: bool,
}

fn default_use_keyring() -> bool {
    true
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            use_keyring: default_use_keyring(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RouterChatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| RouterChatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_base) = std::env::var("ROUTERCHAT_API_BASE") {
            self.provider.api_base = api_base;
        }

        if let Ok(timeout) = std::env::var("ROUTERCHAT_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(value) => self.provider.timeout_seconds = value,
                Err(_) => tracing::warn!(
                    "Ignoring invalid ROUTERCHAT_TIMEOUT_SECONDS value: {}",
                    timeout
                ),
            }
        }

        if let Ok(temperature) = std::env::var("ROUTERCHAT_TEMPERATURE") {
            if temperature.eq_ignore_ascii_case("none") {
                self.provider.temperature = None;
            } else {
                match temperature.parse::<f32>() {
                    Ok(value) => self.provider.temperature = Some(value),
                    Err(_) => tracing::warn!(
                        "Ignoring invalid ROUTERCHAT_TEMPERATURE value: {}",
                        temperature
                    ),
                }
            }
        }

        if let Ok(model) = std::env::var("ROUTERCHAT_DEFAULT_MODEL") {
            if !model.trim().is_empty() {
                self.chat.default_model = Some(model);
            }
        }

        if let Ok(use_keyring) = std::env::var("ROUTERCHAT_USE_KEYRING") {
            match use_keyring.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.credential.use_keyring = true,
                "0" | "false" | "no" | "off" => self.credential.use_keyring = false,
                other => tracing::warn!("Ignoring invalid ROUTERCHAT_USE_KEYRING value: {}", other),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
        if let Some(api_base) = &cli.api_base {
            tracing::debug!("Using API base override from CLI: {}", api_base);
            self.provider.api_base = api_base.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let api_base = self.provider.api_base.trim();
        if api_base.is_empty() {
            return Err(
                RouterChatError::Config("provider.api_base cannot be empty".to_string()).into(),
            );
        }

        let parsed = Url::parse(api_base).map_err(|e| {
            RouterChatError::Config(format!(
                "provider.api_base must be an http(s) URL: {} ({})",
                api_base, e
            ))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RouterChatError::Config(format!(
                "provider.api_base must be an http(s) URL: {}",
                api_base
            ))
            .into());
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(RouterChatError::Config(format!(
                "provider.api_base must be an http(s) URL with a host: {}",
                api_base
            ))
            .into());
        }

        if self.provider.timeout_seconds == 0 {
            return Err(RouterChatError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.provider.timeout_seconds > 600 {
            return Err(RouterChatError::Config(
                "provider.timeout_seconds must be less than or equal to 600".to_string(),
            )
            .into());
        }

        if let Some(temperature) = self.provider.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(RouterChatError::Config(
                    "provider.temperature must be between 0.0 and 2.0".to_string(),
                )
                .into());
            }
        }

        if self.provider.referer.trim().is_empty() || self.provider.title.trim().is_empty() {
            return Err(RouterChatError::Config(
                "provider.referer and provider.title cannot be empty".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
