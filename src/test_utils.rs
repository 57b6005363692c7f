//! Test utilities for RouterChat
//!
//! Provides a scripted [`Provider`] that records every call, so session and
//! command logic can be tested without a network.

use crate::providers::{CompletionResponse, InferenceError, Message, Provider};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One recorded `complete` call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Wire id passed to the provider
    pub model: String,
    /// Transcript passed to the provider
    pub messages: Vec<Message>,
}

/// Provider that answers from a script instead of the network
///
/// Per-model answers take precedence; otherwise queued answers are handed
/// out in order. An exhausted script yields a `MalformedResponse` error.
#[derive(Default)]
pub struct MockProvider {
    queued: Mutex<VecDeque<Result<CompletionResponse, InferenceError>>>,
    per_model: HashMap<String, Result<CompletionResponse, InferenceError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    /// Provider that answers with `replies` in order
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queued: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| Ok(CompletionResponse::new(r)))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// Provider whose first call fails with `error`
    pub fn failing(error: InferenceError) -> Self {
        Self {
            queued: Mutex::new(VecDeque::from([Err(error)])),
            ..Default::default()
        }
    }

    /// Queue an additional scripted result
    pub fn then(self, result: Result<CompletionResponse, InferenceError>) -> Self {
        self.queued.lock().unwrap().push_back(result);
        self
    }

    /// Always answer `model` with `result`
    pub fn with_model_result(
        mut self,
        model: impl Into<String>,
        result: Result<CompletionResponse, InferenceError>,
    ) -> Self {
        self.per_model.insert(model.into(), result);
        self
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
    ) -> Result<CompletionResponse, InferenceError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            messages: messages.to_vec(),
        });

        if let Some(result) = self.per_model.get(model) {
            return result.clone();
        }

        self.queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(InferenceError::MalformedResponse {
                    model: model.to_string(),
                    detail: "no scripted response left".to_string(),
                })
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
