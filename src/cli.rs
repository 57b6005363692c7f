//! Command-line interface definition for RouterChat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chat, model listing, comparison, and
//! credential storage.

use clap::{Parser, Subcommand};

/// RouterChat - chat with OpenRouter-hosted models from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "routerchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,

    /// Override the provider API base URL
    #[arg(long)]
    pub api_base: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for RouterChat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    ///
    /// Without `--model`, the first message selects the model by its
    /// display name.
    Chat {
        /// Display name of the model to preselect (e.g. "DeepSeek R1")
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List the models that can be selected
    Models {
        /// Output as pretty-printed JSON
        #[arg(long)]
        json: bool,
    },

    /// Send one prompt to every model and print each reply
    Compare {
        /// Prompt text to send
        prompt: String,

        /// Output as pretty-printed JSON
        #[arg(long)]
        json: bool,
    },

    /// Store the OpenRouter API key in the OS keyring
    Auth {
        /// API key to store; prompted for when omitted
        #[arg(long)]
        key: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            json_logs: false,
            api_base: None,
            command: Commands::Models { json: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(!cli.json_logs);
        assert!(matches!(cli.command, Commands::Models { json: false }));
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["routerchat", "chat"]).unwrap();
        if let Commands::Chat { model } = cli.command {
            assert_eq!(model, None);
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_chat_with_model() {
        let cli = Cli::try_parse_from(["routerchat", "chat", "--model", "DeepSeek R1"]).unwrap();
        if let Commands::Chat { model } = cli.command {
            assert_eq!(model, Some("DeepSeek R1".to_string()));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_models_json() {
        let cli = Cli::try_parse_from(["routerchat", "models", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Models { json: true }));
    }

    #[test]
    fn test_cli_parse_compare() {
        let cli = Cli::try_parse_from(["routerchat", "compare", "What is Rust?"]).unwrap();
        if let Commands::Compare { prompt, json } = cli.command {
            assert_eq!(prompt, "What is Rust?");
            assert!(!json);
        } else {
            panic!("Expected Compare command");
        }
    }

    #[test]
    fn test_cli_parse_compare_requires_prompt() {
        assert!(Cli::try_parse_from(["routerchat", "compare"]).is_err());
    }

    #[test]
    fn test_cli_parse_auth_with_key() {
        let cli = Cli::try_parse_from(["routerchat", "auth", "--key", "sk-or-test"]).unwrap();
        if let Commands::Auth { key } = cli.command {
            assert_eq!(key, Some("sk-or-test".to_string()));
        } else {
            panic!("Expected Auth command");
        }
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "routerchat",
            "--verbose",
            "--json-logs",
            "--config",
            "custom.yaml",
            "models",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.json_logs);
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
    }

    #[test]
    fn test_cli_parse_invalid_command() {
        assert!(Cli::try_parse_from(["routerchat", "invalid"]).is_err());
    }
}
