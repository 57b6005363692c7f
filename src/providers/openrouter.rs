//! OpenRouter provider implementation for RouterChat
//!
//! This module implements the Provider trait for the OpenRouter
//! chat-completions API. Every call is a single best-effort POST: no retry,
//! no caching, no rate limiting.

use crate::config::OpenRouterConfig;
use crate::credentials::ApiKey;
use crate::error::{Result, RouterChatError};
use crate::providers::{CompletionResponse, InferenceError, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenRouter API provider
///
/// # Examples
///
/// ```no_run
/// use routerchat::config::OpenRouterConfig;
/// use routerchat::credentials::ApiKey;
/// use routerchat::providers::{Message, OpenRouterProvider, Provider};
///
/// # async fn example() -> routerchat::error::Result<()> {
/// let key = ApiKey::new("sk-or-...")?;
/// let provider = OpenRouterProvider::new(OpenRouterConfig::default(), key)?;
/// let reply = provider
///     .reply("deepseek/deepseek-r1", &[Message::user("2+2?")])
///     .await;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterConfig,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Response body from `/chat/completions`
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}


impl OpenRouterProvider {
    /// Create a new OpenRouter provider instance
    ///
    /// The bearer credential and informational headers are installed as
    /// client defaults, so every request carries them.
    ///
    /// # Errors
    ///
    /// Returns error if a header value is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: OpenRouterConfig, api_key: ApiKey) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose()))
            .map_err(|_| {
                RouterChatError::Provider("API key contains invalid header characters".to_string())
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("HTTP-Referer", header_value("referer", &config.referer)?);
        headers.insert("X-Title", header_value("title", &config.title)?);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("routerchat/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                RouterChatError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized OpenRouter provider: api_base={}, timeout={}s",
            config.api_base,
            config.timeout_seconds
        );

        Ok(Self { client, config })
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }

    fn transport_error(&self, model: &str, error: &reqwest::Error) -> InferenceError {
        let description = if error.is_timeout() {
            format!(
                "request timed out after {} seconds",
                self.config.timeout_seconds
            )
        } else if error.is_connect() {
            format!("could not connect to {}: {}", self.config.api_base, error)
        } else {
            error.to_string()
        };

        InferenceError::Transport {
            model: model.to_string(),
            description,
        }
    }
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        RouterChatError::Config(format!("provider.{} is not a valid header value", field)).into()
    })
}

/// Extract the first choice's content from a raw success body
fn parse_completion(
    model: &str,
    body: &str,
) -> std::result::Result<CompletionResponse, InferenceError> {
    let malformed = |detail: String| InferenceError::MalformedResponse {
        model: model.to_string(),
        detail,
    };

    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| malformed(format!("failed to parse response body: {}", e)))?;

    let content = match parsed.choices.into_iter().next() {
        Some(choice) => choice
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| malformed("first choice has no message content".to_string()))?,
        None => {
            // OpenRouter sometimes embeds an error object in a 200 response
            let message = parsed
                .error
                .as_ref()
                .and_then(|err| err.get("message"))
                .and_then(serde_json::Value::as_str)
                .filter(|message| !message.is_empty());
            let detail = match message {
                Some(message) => format!("response contained no choices ({})", message),
                None => "response contained no choices".to_string(),
            };
            return Err(malformed(detail));
        }
    };

    Ok(match parsed.usage.as_ref().and_then(parse_usage) {
        Some(usage) => CompletionResponse::with_usage(content, usage),
        None => CompletionResponse::new(content),
    })
}

/// Read token counts from the optional `usage` object
///
/// Usage is metadata: counts that are missing, negative, or not integers are
/// skipped, and `None` is returned when neither count is usable.
fn parse_usage(usage: &serde_json::Value) -> Option<TokenUsage> {
    let count = |field: &str| {
        usage
            .get(field)
            .and_then(serde_json::Value::as_u64)
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
    };

    match (count("prompt_tokens"), count("completion_tokens")) {
        (None, None) => {
            tracing::debug!("Ignoring unusable usage metadata: {}", usage);
            None
        }
        (prompt, completion) => Some(TokenUsage::new(
            prompt.unwrap_or_default(),
            completion.unwrap_or_default(),
        )),
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
    ) -> std::result::Result<CompletionResponse, InferenceError> {
        let request = ChatCompletionRequest {
            model,
            messages,
            temperature: self.config.temperature,
        };

        tracing::debug!(
            "Sending OpenRouter request: model={}, {} messages",
            model,
            messages.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenRouter request failed: {}", e);
                self.transport_error(model, &e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read OpenRouter response body: {}", e);
            self.transport_error(model, &e)
        })?;

        if !status.is_success() {
            tracing::error!("OpenRouter returned error {}: {}", status, body);
            return Err(InferenceError::Http {
                model: model.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let completion = parse_completion(model, &body).map_err(|e| {
            tracing::error!("Failed to parse OpenRouter response: {}", e);
            e
        })?;

        if let Some(usage) = completion.usage {
            tracing::debug!(
                "OpenRouter response: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Ok(completion)
    }

    fn name(&self) -> &str {
        "openrouter"
    }
}
