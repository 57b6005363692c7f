//! Error types for RouterChat
//!
//! This module defines the crate-level error type used for startup and
//! command failures, using `thiserror` for ergonomic error handling.
//!
//! Per-turn inference failures are not represented here: they are
//! recoverable and travel as [`crate::providers::InferenceError`] values so
//! the chat loop can display them and keep going.

use thiserror::Error;

/// Main error type for RouterChat operations
///
/// Covers configuration loading, credential resolution, model selection
/// at startup, and the I/O and serialization failures that can abort a
/// command.
#[derive(Error, Debug)]
pub enum RouterChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key could be resolved at startup
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// A model display name did not match the registry
    #[error("Invalid model selection: {0}")]
    InvalidSelection(String),

    /// Provider construction errors (HTTP client, headers)
    #[error("Provider error: {0}")]
    Provider(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for RouterChat operations
///
/// Uses `anyhow::Error` so command handlers can attach context while
/// propagating errors up to `main`.
pub type Result<T> = anyhow::Result<T>;
