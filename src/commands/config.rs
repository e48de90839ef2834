//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Validate and store one value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{API_URL_ENV, Config, VALID_KEYS};
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let env_override = config.api_url() != config.api_url;

    let json_output = json!({
        "api_url": config.api_url(),
        "api_url_from_env": env_override,
        "batch_size": config.batch_size,
        "display_limit": config.display_limit,
        "moves_limit": config.moves_limit,
        "request_timeout": config.request_timeout,
        "connect_timeout": config.connect_timeout,
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    for key in VALID_KEYS {
        let value = config.get_value(key)?;
        text_output.push_str(&format!("{}: {value}", key.cyan()));
        if *key == "api_url" && env_override {
            text_output.push_str(&format!(" {}", format!("(from {API_URL_ENV})").dimmed()));
        }
        text_output.push('\n');
    }

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    let stored = config.get_value(key)?;
    let json_output = json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    });
    let text_output = format!("Set {} to {}", key.cyan(), stored);

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let value = config.get_value(key)?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value)
    .print(output)
}
