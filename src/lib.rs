//! RouterChat - terminal chat client library for OpenRouter
//!
//! This library provides the pieces behind the `routerchat` binary: a static
//! model registry, a per-session selection and transcript store, an inference
//! provider abstraction with an OpenRouter implementation, and the thin
//! command adapters that drive them.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `registry`: Display name to wire id mapping
//! - `session`: Per-session model selection and transcript
//! - `turn`: One turn of user input against a session
//! - `providers`: Inference provider abstraction and OpenRouter client
//! - `credentials`: API key resolution from environment or keyring
//! - `commands`: Chat, models, compare, and auth command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use routerchat::credentials::ApiKey;
//! use routerchat::providers::create_provider;
//! use routerchat::turn::handle_turn;
//! use routerchat::{Config, ModelRegistry, SessionState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider, ApiKey::resolve(&config.credential)?)?;
//!     let registry = ModelRegistry::builtin();
//!     let mut session = SessionState::new();
//!
//!     handle_turn(&mut session, &registry, provider.as_ref(), "DeepSeek R1").await;
//!     let outcome = handle_turn(&mut session, &registry, provider.as_ref(), "2+2?").await;
//!     println!("{}", outcome.display_text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod providers;
pub mod registry;
pub mod session;
pub mod turn;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, RouterChatError};
pub use registry::{ModelDescriptor, ModelRegistry};
pub use session::{SelectionError, SessionState};
pub use turn::{handle_turn, TurnOutcome};

#[cfg(test)]
pub mod test_utils;
