//! Base provider trait and common types for RouterChat
//!
//! This module defines the Provider trait that inference backends implement,
//! along with the message, usage, and error types shared by the session
//! store and the chat front-ends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person chatting
    User,
    /// Text produced by the model
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One role-tagged entry of a transcript
///
/// Serializes to the `{"role": ..., "content": ...}` shape the
/// chat-completions API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Creates a new message with an explicit role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use routerchat::providers::{Message, Role};
    ///
    /// let msg = Message::user("Hello, assistant!");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use routerchat::providers::{Message, Role};
    ///
    /// let msg = Message::assistant("Hello, user!");
    /// assert_eq!(msg.role, Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Token usage information from a completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use routerchat::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// Add another usage record to this one
    ///
    /// Counts come from the provider and saturate instead of overflowing.
    pub fn accumulate(&mut self, other: TokenUsage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self
            .completion_tokens
            .saturating_add(other.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }
}

/// Response from a successful completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text of the first choice
    pub content: String,
    /// Token usage, when the provider reported it
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a response without usage information
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    /// Create a response with usage information
    pub fn with_usage(content: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            content: content.into(),
            usage: Some(usage),
        }
    }
}

/// Recoverable failure of a single inference request
///
/// The `Display` output is the human-readable reply shown in place of the
/// model's answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// Provider answered with a non-2xx status
    #[error("HTTP error from `{model}`: {status}\n{body}")]
    Http {
        /// Wire id the request was made for
        model: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Request never produced a response (DNS, connect, timeout)
    #[error("Request to `{model}` failed: {description}")]
    Transport {
        /// Wire id the request was made for
        model: String,
        /// What went wrong
        description: String,
    },

    /// Provider answered 2xx but the body lacked the expected fields
    #[error("Unexpected error from `{model}`: {detail}")]
    MalformedResponse {
        /// Wire id the request was made for
        model: String,
        /// What was missing or unparsable
        detail: String,
    },
}

/// Provider trait for inference backends
///
/// A provider turns a wire id and the full transcript into exactly one
/// outbound request and one parsed reply. It holds no per-session state,
/// so one instance can serve any number of sessions.
///
/// # Examples
///
/// ```
/// use routerchat::providers::{CompletionResponse, InferenceError, Message, Provider};
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn complete(
///         &self,
///         _model: &str,
///         messages: &[Message],
///     ) -> Result<CompletionResponse, InferenceError> {
///         let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
///         Ok(CompletionResponse::new(last))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Request a completion for `messages` from the model `model`
    ///
    /// # Errors
    ///
    /// Returns an [`InferenceError`] for HTTP, transport, or response-shape
    /// failures. Implementations must not panic on any of these.
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
    ) -> Result<CompletionResponse, InferenceError>;

    /// Request a completion and fold any failure into display text
    ///
    /// Returns the assistant's text on success, or the formatted error.
    async fn reply(&self, model: &str, messages: &[Message]) -> String {
        match self.complete(model, messages).await {
            Ok(response) => response.content,
            Err(e) => e.to_string(),
        }
    }

    /// Short provider name used in logs
    fn name(&self) -> &str {
        "provider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockProvider;

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Hi there");
    }

    #[test]
    fn test_message_serializes_lowercase_role() {
        let json = serde_json::to_value(Message::user("2+2?")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "2+2?"}));

        let json = serde_json::to_value(Message::assistant("4")).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_token_usage_accumulate() {
        let mut usage = TokenUsage::default();
        usage.accumulate(TokenUsage::new(10, 5));
        usage.accumulate(TokenUsage::new(3, 2));
        assert_eq!(usage, TokenUsage::new(13, 7));
        assert_eq!(usage.total_tokens, 20);
    }

    #[test]
    fn test_token_usage_saturates_on_huge_counts() {
        let usage = TokenUsage::new(usize::MAX, 1);
        assert_eq!(usage.total_tokens, usize::MAX);

        let mut total = TokenUsage::new(usize::MAX - 1, 0);
        total.accumulate(TokenUsage::new(5, 5));
        assert_eq!(total.prompt_tokens, usize::MAX);
        assert_eq!(total.completion_tokens, 5);
        assert_eq!(total.total_tokens, usize::MAX);
    }

    #[test]
    fn test_completion_response_with_usage() {
        let response = CompletionResponse::with_usage("4", TokenUsage::new(12, 1));
        assert_eq!(response.content, "4");
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(13));
    }

    #[test]
    fn test_http_error_display_contains_status_and_body() {
        let error = InferenceError::Http {
            model: "deepseek/deepseek-r1".to_string(),
            status: 429,
            body: "rate limited".to_string(),
        };
        let text = error.to_string();
        assert!(text.contains("429"));
        assert!(text.contains("rate limited"));
        assert!(text.contains("deepseek/deepseek-r1"));
    }

    #[test]
    fn test_transport_error_display() {
        let error = InferenceError::Transport {
            model: "m".to_string(),
            description: "request timed out after 60 seconds".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Request to `m` failed: request timed out after 60 seconds"
        );
    }

    #[test]
    fn test_malformed_error_display() {
        let error = InferenceError::MalformedResponse {
            model: "m".to_string(),
            detail: "response contained no choices".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unexpected error from `m`: response contained no choices"
        );
    }

    #[tokio::test]
    async fn test_reply_returns_content_on_success() {
        let provider = MockProvider::replying(["hello"]);
        let text = provider.reply("m", &[Message::user("hi")]).await;
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_reply_folds_error_into_text() {
        let provider = MockProvider::failing(InferenceError::Http {
            model: "m".to_string(),
            status: 503,
            body: "upstream unavailable".to_string(),
        });
        let text = provider.reply("m", &[Message::user("hi")]).await;
        assert!(text.contains("503"));
        assert!(text.contains("upstream unavailable"));
    }

    #[test]
    fn test_provider_is_object_safe() {
        fn accepts(_: &dyn Provider) {}
        accepts(&MockProvider::replying(["x"]));
    }
}
