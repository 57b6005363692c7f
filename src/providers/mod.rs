//! Provider module for RouterChat
//!
//! This module contains the inference provider abstraction and the
//! OpenRouter implementation.

pub mod base;
pub mod openrouter;

pub use base::{CompletionResponse, InferenceError, Message, Provider, Role, TokenUsage};
pub use openrouter::OpenRouterProvider;

use crate::config::OpenRouterConfig;
use crate::credentials::ApiKey;
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - OpenRouter connection settings
/// * `api_key` - Resolved bearer credential
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if provider initialization fails
pub fn create_provider(config: &OpenRouterConfig, api_key: ApiKey) -> Result<Box<dyn Provider>> {
    Ok(Box::new(OpenRouterProvider::new(config.clone(), api_key)?))
}
