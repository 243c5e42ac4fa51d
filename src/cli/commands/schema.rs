//! Schema command implementation.
//!
//! `envmatch schema` prints the JSON Schema of the catalog format, for
//! editor integration.

use crate::config::catalog_schema;
use crate::error::{EnvMatchError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let json = serde_json::to_string_pretty(&catalog_schema())
            .map_err(|e| EnvMatchError::Other(e.into()))?;
        ui.message(&json);
        Ok(CommandResult::success())
    }
}
