//! Model listing command for RouterChat
//!
//! Prints the static model registry either as a table or as JSON. No
//! credential or network access is needed.

use crate::error::{Result, RouterChatError};
use crate::registry::{ModelDescriptor, ModelRegistry};
use prettytable::{row, Table};

/// List the models available for selection
///
/// # Arguments
///
/// * `registry` - Registry to list
/// * `json` - Emit pretty-printed JSON instead of a table
///
/// # Errors
///
/// Returns `RouterChatError::Serialization` if JSON output fails
///
/// # Examples
///
/// ```
/// use routerchat::commands::models::list_models;
/// use routerchat::registry::ModelRegistry;
///
/// list_models(&ModelRegistry::builtin(), false).unwrap();
/// ```
pub fn list_models(registry: &ModelRegistry, json: bool) -> Result<()> {
    tracing::debug!("models::list_models flags - json: {}", json);

    if json {
        output_models_json(registry.models())
    } else {
        output_models_table(registry.models());
        Ok(())
    }
}

fn serialize_pretty<T: serde::Serialize + ?Sized>(
    value: &T,
) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Output models in JSON format
///
/// # Errors
///
/// Returns `RouterChatError::Serialization` if serialization fails
fn output_models_json(models: &[ModelDescriptor]) -> Result<()> {
    let json = serialize_pretty(models).map_err(RouterChatError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// Build the table shown by `models` and `/models`
pub(crate) fn models_table(models: &[ModelDescriptor]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Display Name", "Model ID"]);

    for model in models {
        table.add_row(row![model.display_name, model.wire_id]);
    }

    table
}

/// Output models in table format
pub(crate) fn output_models_table(models: &[ModelDescriptor]) {
    println!("\nAvailable models:\n");
    models_table(models).printstd();
    println!();
}
