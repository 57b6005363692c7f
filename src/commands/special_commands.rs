//! Special commands parser for interactive chat mode
//!
//! Special commands are handled by the chat loop itself and never reach the
//! model. They are prefixed with `/` and are case-insensitive; `exit` and
//! `quit` also work without the slash. A `/` line whose first word is not a
//! known command is ordinary input, so prompts like `/etc/hosts explained?`
//! still reach the model.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Command was given an argument it does not take
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// List the models available for selection
    ListModels,

    /// Show the selected model, transcript size, and token usage
    ShowStatus,

    /// Print the transcript so far
    ShowHistory,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be handled as a selection or a prompt.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnsupportedArgument` if a known command is
/// followed by extra text.
///
/// # Examples
///
/// ```
/// use routerchat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/STATUS").unwrap(), SpecialCommand::ShowStatus);
/// assert_eq!(parse_special_command("quit").unwrap(), SpecialCommand::Exit);
/// assert_eq!(parse_special_command("DeepSeek R1").unwrap(), SpecialCommand::None);
/// assert_eq!(parse_special_command("/etc/hosts?").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/status now").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let mut parts = lower.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let parsed = match command {
        "/help" | "/?" => SpecialCommand::Help,
        "/models" => SpecialCommand::ListModels,
        "/status" => SpecialCommand::ShowStatus,
        "/history" => SpecialCommand::ShowHistory,
        "exit" | "quit" | "/exit" | "/quit" => SpecialCommand::Exit,
        _ => return Ok(SpecialCommand::None),
    };

    if !arg.is_empty() {
        return Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        });
    }

    Ok(parsed)
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
==========================================

MODEL SELECTION:
  <display name>  - Before a model is chosen, type its exact display name
  /models         - Show the models available for selection

SESSION INFORMATION:
  /status         - Show the selected model, transcript size, and token usage
  /history        - Print the conversation so far
  /help           - Show this help message
  /?              - Same as /help

SESSION CONTROL:
  exit            - Exit interactive mode
  quit            - Same as exit

NOTES:
  - Commands are case-insensitive
  - Other lines starting with / are sent to the model as text
  - A model is chosen once per session; start a new session to switch
  - Every prompt is sent with the full conversation so far
"#
    );
}
