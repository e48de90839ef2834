mod browse;
mod config;
mod ls;
mod show;

pub use browse::cmd_browse;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use ls::{LsOptions, cmd_ls, load_store};
pub use show::cmd_show;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputOptions;
use crate::error::Result;

/// Print a serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Result of a one-shot command, printable as JSON or text
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print as JSON when requested, otherwise as text. Without text the JSON
    /// is printed either way.
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}
