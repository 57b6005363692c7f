//! RouterChat - chat with OpenRouter-hosted models from the terminal
//!
//! Main entry point for the RouterChat application.

use anyhow::Result;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use routerchat::cli::{Cli, Commands};
use routerchat::commands;
use routerchat::config::Config;
use routerchat::registry::ModelRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first so logging can honor --verbose
    let cli = Cli::parse_args();

    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { model } => {
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }
            commands::chat::run_chat(config, model).await?;
            Ok(())
        }
        Commands::Models { json } => {
            tracing::info!("Listing registered models");
            commands::models::list_models(&ModelRegistry::builtin(), json)?;
            Ok(())
        }
        Commands::Compare { prompt, json } => {
            tracing::info!("Starting model comparison");
            commands::compare::run_compare(config, prompt, json).await?;
            Ok(())
        }
        Commands::Auth { key } => {
            commands::auth::run_auth(key).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with chat output on stdout.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "routerchat=debug"
    } else {
        "routerchat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
