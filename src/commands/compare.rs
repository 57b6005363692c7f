//! Fan-out comparison of one prompt across every registered model
//!
//! Each model receives an independent single-message request; there is no
//! session and no shared transcript. Requests run concurrently and results
//! are reported in registry order.

use crate::config::Config;
use crate::credentials::ApiKey;
use crate::error::{Result, RouterChatError};
use crate::providers::{create_provider, Message, Provider, TokenUsage};
use crate::registry::ModelRegistry;
use colored::Colorize;
use futures::future::join_all;
use serde::Serialize;
use std::time::Instant;

/// One model's answer to a compared prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Display name of the model
    pub display_name: String,
    /// Wire id the request was made for
    pub wire_id: String,
    /// Whether the provider returned a reply
    pub success: bool,
    /// Reply text, or the formatted error on failure
    pub reply: String,
    /// Token usage, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Wall-clock time of the request
    pub duration_ms: u64,
}

/// Send `prompt` to every model in `registry`
///
/// Never fails: per-model errors are captured in the returned results.
///
/// # Arguments
///
/// * `provider` - Inference backend shared by all requests
/// * `registry` - Models to query, in reporting order
/// * `prompt` - Single user message sent to each model
pub async fn compare_models(
    provider: &dyn Provider,
    registry: &ModelRegistry,
    prompt: &str,
) -> Vec<ComparisonResult> {
    let messages = [Message::user(prompt)];

    tracing::info!(
        compare.models = registry.len(),
        "Starting comparison across registered models"
    );

    let requests = registry.iter().map(|model| {
        let messages = &messages;
        async move {
            let start = Instant::now();
            let result = provider.complete(&model.wire_id, messages).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(response) => ComparisonResult {
                    display_name: model.display_name.clone(),
                    wire_id: model.wire_id.clone(),
                    success: true,
                    reply: response.content,
                    usage: response.usage,
                    duration_ms,
                },
                Err(e) => {
                    tracing::warn!(
                        compare.model = %model.wire_id,
                        compare.error = %e,
                        "Model request failed"
                    );
                    ComparisonResult {
                        display_name: model.display_name.clone(),
                        wire_id: model.wire_id.clone(),
                        success: false,
                        reply: e.to_string(),
                        usage: None,
                        duration_ms,
                    }
                }
            }
        }
    });

    let results = join_all(requests).await;

    tracing::info!(
        compare.succeeded = results.iter().filter(|r| r.success).count(),
        compare.failed = results.iter().filter(|r| !r.success).count(),
        "Comparison complete"
    );

    results
}

/// Run the `compare` command
///
/// # Errors
///
/// Returns error if the prompt is blank, no credential is available, the
/// provider cannot be created, or JSON output fails.
pub async fn run_compare(config: Config, prompt: String, json: bool) -> Result<()> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(RouterChatError::Config("compare prompt cannot be empty".to_string()).into());
    }

    let api_key = ApiKey::resolve(&config.credential)?;
    let provider = create_provider(&config.provider, api_key)?;
    let registry = ModelRegistry::builtin();

    let results = compare_models(provider.as_ref(), &registry, prompt).await;

    if json {
        let output =
            serde_json::to_string_pretty(&results).map_err(RouterChatError::Serialization)?;
        println!("{}", output);
    } else {
        print_results(&results);
    }

    Ok(())
}

fn print_results(results: &[ComparisonResult]) {
    for result in results {
        let header = format!("## {} ({})", result.display_name, result.wire_id);
        println!("{}", header.bold());
        if result.success {
            println!("{}", result.reply);
        } else {
            println!("{}", result.reply.red());
        }
        println!("{}", format!("[{} ms]", result.duration_ms).dimmed());
        println!();
    }
}
