//! OpenRouter API key resolution
//!
//! The key is resolved once when a network command starts: first from the
//! `OPENROUTER_API_KEY` environment variable, then from the OS keyring.
//! Failing to find one is fatal for that command.

use crate::config::CredentialConfig;
use crate::error::{Result, RouterChatError};
use std::fmt;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Keyring service name
pub const KEYRING_SERVICE: &str = "routerchat";

/// Keyring user name
pub const KEYRING_USER: &str = "openrouter";

/// Bearer credential for the provider
///
/// `Debug` output is redacted so the key never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `RouterChatError::MissingCredential` if the key is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RouterChatError::MissingCredential("API key is empty".to_string()).into());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Resolve the key from the environment, then the keyring
    ///
    /// # Errors
    ///
    /// Returns `RouterChatError::MissingCredential` if neither source has a key.
    pub fn resolve(config: &CredentialConfig) -> Result<Self> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        Self::from_sources(from_env, || {
            if config.use_keyring {
                read_keyring()
            } else {
                None
            }
        })
    }

    /// Pick the first non-blank key from `env_value` or `stored`
    ///
    /// `stored` is only consulted when the environment has no key.
    pub fn from_sources<F>(env_value: Option<String>, stored: F) -> Result<Self>
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using API key from {}", API_KEY_ENV);
            return Self::new(value);
        }

        if let Some(value) = stored().filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using API key from keyring");
            return Self::new(value);
        }

        Err(RouterChatError::MissingCredential(format!(
            "set {} or run `routerchat auth` to store a key",
            API_KEY_ENV
        ))
        .into())
    }

    /// The raw key, for building the authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

fn read_keyring() -> Option<String> {
    let entry = match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!("Keyring unavailable: {}", e);
            return None;
        }
    };

    match entry.get_password() {
        Ok(password) => Some(password),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            tracing::warn!("Failed to read API key from keyring: {}", e);
            None
        }
    }
}

/// Store `key` in the OS keyring for later sessions
///
/// # Errors
///
/// Returns error if the key is blank or the keyring rejects the write.
pub fn store_in_keyring(key: &ApiKey) -> Result<()> {
    let entry =
        keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).map_err(RouterChatError::Keyring)?;
    entry
        .set_password(key.expose())
        .map_err(RouterChatError::Keyring)?;
    tracing::info!("Stored API key in keyring ({}/{})", KEYRING_SERVICE, KEYRING_USER);
    Ok(())
}
