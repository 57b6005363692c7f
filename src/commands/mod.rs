/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level commands:

- `chat`:    Interactive chat session
- `models`:  List the model registry
- `compare`: Send one prompt to every registered model
- `auth`:    Store the OpenRouter API key in the OS keyring

Handlers are thin adapters over the session store, the turn handler, and
the provider.
*/

use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::credentials::{store_in_keyring, ApiKey};
use crate::error::{Result, RouterChatError};
use crate::providers::create_provider;
use crate::registry::ModelRegistry;
use crate::session::SessionState;
use crate::turn::{handle_turn, TurnOutcome};

// Special commands parser for the chat loop
pub mod special_commands;

// Model listing
pub mod models;

// Prompt fan-out across all models
pub mod compare;

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Creates one session and runs a readline-based loop. Until a model is
    //! chosen each line is a selection command; afterwards each line is a
    //! prompt sent with the full transcript.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `model` - Display name to preselect; falls back to `chat.default_model`
    ///
    /// # Errors
    ///
    /// Returns error if the preselected model is unknown, no credential is
    /// available, or the provider or line editor cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// use routerchat::commands::chat;
    /// use routerchat::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default(), Some("DeepSeek R1".to_string())).await?;
    /// ```
    pub async fn run_chat(config: Config, model: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let registry = ModelRegistry::builtin();
        let mut session = SessionState::new();

        if let Some(name) = model.or_else(|| config.chat.default_model.clone()) {
            session
                .select(&registry, name.trim())
                .map_err(|e| RouterChatError::InvalidSelection(e.to_string()))?;
        }

        let api_key = ApiKey::resolve(&config.credential)?;
        let provider = create_provider(&config.provider, api_key)?;

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&session, &registry);

        loop {
            let prompt = format_prompt(&session);
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::ListModels) => {
                            models::output_models_table(registry.models());
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            print_status_display(&session);
                            continue;
                        }
                        Ok(SpecialCommand::ShowHistory) => {
                            print_history(&session);
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().yellow());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    let outcome =
                        handle_turn(&mut session, &registry, provider.as_ref(), trimmed).await;
                    render_outcome(&outcome, &registry);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        tracing::info!(
            "Session {} ended after {} messages",
            session.id(),
            session.transcript().len()
        );
        println!("Goodbye!");
        Ok(())
    }

    /// Readline prompt reflecting the selection state
    pub(crate) fn format_prompt(session: &SessionState) -> String {
        match session.selected() {
            Some(model) => format!("[{}] >> ", model.display_name.cyan()),
            None => format!("[{}] >> ", "select model".yellow()),
        }
    }

    fn render_outcome(outcome: &TurnOutcome, registry: &ModelRegistry) {
        let Some(text) = outcome.display_text() else {
            return;
        };

        match outcome {
            TurnOutcome::Ignored => {}
            TurnOutcome::ModelSelected(_) => println!("{}\n", text.green()),
            TurnOutcome::SelectionRejected(_) => {
                println!("{}", text.yellow());
                println!("Available models: {}\n", registry.display_names().join(", "));
            }
            TurnOutcome::Reply { .. } => println!("\n{}\n", text),
            TurnOutcome::Failed { .. } => eprintln!("\n{}\n", text.red()),
        }
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(session: &SessionState, registry: &ModelRegistry) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║         RouterChat Interactive Chat - Welcome!               ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        match session.selected() {
            Some(model) => println!(
                "Chatting with {} ({})\n",
                model.display_name.cyan(),
                model.wire_id
            ),
            None => {
                println!("Which model would you like to use? Type one of:");
                for name in registry.display_names() {
                    println!("  - {}", name);
                }
                println!();
            }
        }
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display detailed status information about the current session
    fn print_status_display(session: &SessionState) {
        let usage = session.usage();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   RouterChat Session Status                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Session:           {}", session.id());
        match session.selected() {
            Some(model) => println!(
                "Model:             {} ({})",
                model.display_name.cyan(),
                model.wire_id
            ),
            None => println!("Model:             {}", "not selected".yellow()),
        }
        println!("Conversation Size: {} messages", session.transcript().len());
        println!(
            "Token Usage:       {} prompt, {} completion, {} total",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
        println!();
    }

    fn print_history(session: &SessionState) {
        if session.transcript().is_empty() {
            println!("No messages yet\n");
            return;
        }

        for message in session.transcript() {
            println!("{}: {}", message.role.to_string().bold(), message.content);
        }
        println!();
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::config::Config;

        /// Unknown preselected model fails before any credential lookup
        #[tokio::test]
        async fn test_run_chat_unknown_model() {
            let res = run_chat(Config::default(), Some("GPT-9".to_string())).await;
            let err = res.unwrap_err().downcast::<RouterChatError>().unwrap();
            assert!(matches!(err, RouterChatError::InvalidSelection(_)));
        }

        #[tokio::test]
        async fn test_run_chat_unknown_default_model() {
            let mut cfg = Config::default();
            cfg.chat.default_model = Some("nope".to_string());
            assert!(run_chat(cfg, None).await.is_err());
        }

        #[tokio::test]
        async fn test_slash_prompt_after_selection_reaches_model() {
            let registry = ModelRegistry::builtin();
            let provider = crate::test_utils::MockProvider::replying(["a hosts file"]);
            let mut session = SessionState::new();
            session.select(&registry, "DeepSeek R1").unwrap();

            let line = "/etc/hosts explained?";
            assert_eq!(parse_special_command(line).unwrap(), SpecialCommand::None);

            let outcome = handle_turn(&mut session, &registry, &provider, line).await;
            assert_eq!(outcome.display_text().as_deref(), Some("a hosts file"));
            assert_eq!(
                provider.calls()[0].messages,
                vec![crate::providers::Message::user(line)]
            );
        }

        #[test]
        fn test_format_prompt_reflects_selection() {
            colored::control::set_override(false);

            let registry = ModelRegistry::builtin();
            let mut session = SessionState::new();
            assert_eq!(format_prompt(&session), "[select model] >> ");

            session.select(&registry, "Gemma 3 27B").unwrap();
            assert_eq!(format_prompt(&session), "[Gemma 3 27B] >> ");
        }

        #[test]
        fn test_print_helpers_do_not_panic() {
            let registry = ModelRegistry::builtin();
            let mut session = SessionState::new();
            print_welcome_banner(&session, &registry);
            print_status_display(&session);
            print_history(&session);

            session.select(&registry, "DeepSeek R1").unwrap();
            session.append(crate::providers::Role::User, "2+2?");
            print_welcome_banner(&session, &registry);
            print_history(&session);
            render_outcome(&TurnOutcome::Ignored, &registry);
        }
    }
}

/// Auth command
///
/// Stores the OpenRouter API key in the OS keyring so later sessions can
/// start without `OPENROUTER_API_KEY` set.
pub mod auth {
    use super::*;
    use rustyline::DefaultEditor;

    /// Store an API key, prompting for it when `key` is `None`
    ///
    /// # Errors
    ///
    /// Returns error if the key is blank or the keyring rejects the write.
    pub async fn run_auth(key: Option<String>) -> Result<()> {
        tracing::info!("Starting API key setup");

        let raw = match key {
            Some(key) => key,
            None => {
                let mut rl = DefaultEditor::new()?;
                rl.readline("OpenRouter API key: ")?
            }
        };

        let api_key = ApiKey::new(raw)?;
        store_in_keyring(&api_key)?;
        println!("API key stored in the system keyring.");
        Ok(())
    }

}
