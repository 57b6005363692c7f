//! Per-session model selection and transcript
//!
//! A [`SessionState`] is created empty when a chat session starts, owned by
//! the front-end driving that session, and dropped when the session ends.
//! Nothing in here is shared between sessions.

use crate::providers::{Message, Role, TokenUsage};
use crate::registry::{ModelDescriptor, ModelRegistry};
use thiserror::Error;
use uuid::Uuid;

/// Why a selection attempt was refused
///
/// Both variants leave the session untouched; the front-end re-prompts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The input is not a registered display name
    #[error("Unknown model `{input}`{}", suggestion_hint(.suggestion))]
    Invalid {
        /// Text the user entered
        input: String,
        /// Closest registered display name, if any is similar enough
        suggestion: Option<String>,
    },

    /// A model was already chosen for this session
    #[error("Model already selected: {current}. Start a new session to switch models")]
    AlreadySelected {
        /// Display name of the current model
        current: String,
    },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{}`?)", name),
        None => String::new(),
    }
}

/// Selection state of a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No model chosen yet; the next input is a selection command
    #[default]
    Unselected,
    /// Model chosen for the remainder of the session
    Selected(ModelDescriptor),
}

/// State owned by one chat session
///
/// # Examples
///
/// ```
/// use routerchat::registry::ModelRegistry;
/// use routerchat::session::SessionState;
///
/// let registry = ModelRegistry::builtin();
/// let mut session = SessionState::new();
/// assert!(session.current_model().is_none());
///
/// session.select(&registry, "DeepSeek R1").unwrap();
/// assert_eq!(session.current_model(), Some("deepseek/deepseek-r1"));
/// ```
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    selection: Selection,
    transcript: Vec<Message>,
    usage: TokenUsage,
}

impl SessionState {
    /// Create an unselected session with an empty transcript
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        tracing::debug!("Created session {}", id);
        Self {
            id,
            selection: Selection::Unselected,
            transcript: Vec::new(),
            usage: TokenUsage::default(),
        }
    }

    /// Unique id of this session, used to correlate log lines
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Select the model whose display name is exactly `name`
    ///
    /// Succeeds at most once per session and returns the chosen descriptor.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::AlreadySelected` if a model was already
    /// chosen, or `SelectionError::Invalid` if `name` is not registered.
    /// The session is unchanged in both cases.
    pub fn select(
        &mut self,
        registry: &ModelRegistry,
        name: &str,
    ) -> Result<ModelDescriptor, SelectionError> {
        if let Selection::Selected(current) = &self.selection {
            return Err(SelectionError::AlreadySelected {
                current: current.display_name.clone(),
            });
        }

        let descriptor = registry
            .lookup(name)
            .ok_or_else(|| SelectionError::Invalid {
                input: name.to_string(),
                suggestion: registry.suggest(name).map(str::to_string),
            })?
            .clone();

        tracing::info!(
            "Session {} selected model {} ({})",
            self.id,
            descriptor.display_name,
            descriptor.wire_id
        );
        self.selection = Selection::Selected(descriptor.clone());

        Ok(descriptor)
    }

    /// Append a message to the transcript
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.transcript.push(Message::new(role, content));
    }

    /// Wire id of the selected model
    pub fn current_model(&self) -> Option<&str> {
        self.selected().map(|m| m.wire_id.as_str())
    }

    /// Descriptor of the selected model
    pub fn selected(&self) -> Option<&ModelDescriptor> {
        match &self.selection {
            Selection::Selected(descriptor) => Some(descriptor),
            Selection::Unselected => None,
        }
    }

    /// Whether a model has been chosen
    pub fn is_selected(&self) -> bool {
        matches!(self.selection, Selection::Selected(_))
    }

    /// Current selection state
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Messages exchanged so far, oldest first
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Add provider-reported token usage to the session total
    pub fn record_usage(&mut self, usage: TokenUsage) {
        self.usage.accumulate(usage);
    }

    /// Token usage accumulated over the session
    pub fn usage(&self) -> TokenUsage {
        self.usage
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
