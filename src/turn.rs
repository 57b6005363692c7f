//! Single-turn handling shared by every chat front-end
//!
//! While a session is unselected, input is treated as a model selection
//! command. Once a model is chosen, input is appended to the transcript and
//! the full transcript is sent to the provider.

use crate::providers::{InferenceError, Provider, Role, TokenUsage};
use crate::registry::{ModelDescriptor, ModelRegistry};
use crate::session::{SelectionError, SessionState};

/// What happened during one turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Input was blank; nothing changed
    Ignored,
    /// The session's model was chosen; the transcript is unchanged
    ModelSelected(ModelDescriptor),
    /// Input did not name a registered model; re-prompt
    SelectionRejected(SelectionError),
    /// The model answered; transcript grew by the prompt and the reply
    Reply {
        /// Wire id that answered
        model: String,
        /// Assistant text
        content: String,
        /// Token usage, when reported
        usage: Option<TokenUsage>,
    },
    /// The request failed; transcript grew by the prompt only
    Failed {
        /// Wire id the request was made for
        model: String,
        /// What went wrong
        error: InferenceError,
    },
}

impl TurnOutcome {
    /// Text to show the user for this turn, if any
    ///
    /// A failure renders as its formatted error, in place of the reply.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::Ignored => None,
            Self::ModelSelected(model) => Some(format!(
                "Model `{}` selected. You can start chatting now!",
                model.display_name
            )),
            Self::SelectionRejected(err) => Some(err.to_string()),
            Self::Reply { content, .. } => Some(content.clone()),
            Self::Failed { error, .. } => Some(error.to_string()),
        }
    }
}

/// Process one line of user input against `session`
///
/// # Arguments
///
/// * `session` - Session owned by the calling front-end
/// * `registry` - Models available for selection
/// * `provider` - Inference backend
/// * `input` - Raw user text; surrounding whitespace is trimmed
///
/// # Examples
///
/// ```no_run
/// use routerchat::providers::Provider;
/// use routerchat::registry::ModelRegistry;
/// use routerchat::session::SessionState;
/// use routerchat::turn::{handle_turn, TurnOutcome};
///
/// # async fn example(provider: &dyn Provider) {
/// let registry = ModelRegistry::builtin();
/// let mut session = SessionState::new();
///
/// handle_turn(&mut session, &registry, provider, "DeepSeek R1").await;
/// if let TurnOutcome::Reply { content, .. } =
///     handle_turn(&mut session, &registry, provider, "2+2?").await
/// {
///     println!("{}", content);
/// }
/// # }
/// ```
pub async fn handle_turn(
    session: &mut SessionState,
    registry: &ModelRegistry,
    provider: &dyn Provider,
    input: &str,
) -> TurnOutcome {
    let input = input.trim();
    if input.is_empty() {
        return TurnOutcome::Ignored;
    }

    let model = match session.current_model() {
        Some(model) => model.to_string(),
        None => {
            return match session.select(registry, input) {
                Ok(descriptor) => TurnOutcome::ModelSelected(descriptor),
                Err(err) => {
                    tracing::debug!("Session {} rejected selection: {}", session.id(), err);
                    TurnOutcome::SelectionRejected(err)
                }
            };
        }
    };

    session.append(Role::User, input);

    tracing::debug!(
        "Session {} sending {} messages to {} via {}",
        session.id(),
        session.transcript().len(),
        model,
        provider.name()
    );

    match provider.complete(&model, session.transcript()).await {
        Ok(response) => {
            session.append(Role::Assistant, response.content.clone());
            if let Some(usage) = response.usage {
                session.record_usage(usage);
            }
            TurnOutcome::Reply {
                model,
                content: response.content,
                usage: response.usage,
            }
        }
        Err(error) => {
            tracing::warn!("Session {} turn failed: {}", session.id(), error);
            TurnOutcome::Failed { model, error }
        }
    }
}
