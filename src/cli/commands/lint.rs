//! Lint command implementation.
//!
//! The `envmatch lint` command validates the catalog and lists every
//! problem found, rather than stopping at the first.

use serde::Serialize;

use crate::cli::args::LintArgs;
use crate::config::{load_catalog, validate_catalog, ValidationError};
use crate::error::{EnvMatchError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{CatalogSource, Command, CommandResult};

/// The lint command implementation.
pub struct LintCommand {
    source: CatalogSource,
    args: LintArgs,
}

#[derive(Serialize)]
struct Diagnostic<'a> {
    rule: &'a str,
    entry: &'a str,
    message: &'a str,
}

impl<'a> From<&'a ValidationError> for Diagnostic<'a> {
    fn from(error: &'a ValidationError) -> Self {
        Self {
            rule: &error.rule,
            entry: &error.entry,
            message: &error.message,
        }
    }
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(source: CatalogSource, args: LintArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &LintArgs {
        &self.args
    }
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Load without validating; validation is what this command reports.
        let file = match load_catalog(
            &self.source.project_root,
            self.source.override_path.as_deref(),
        ) {
            Ok(file) => file,
            Err(EnvMatchError::ConfigNotFound { path }) => {
                ui.error(&format!("No catalog found at {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(EnvMatchError::ConfigParseError { path, message }) => {
                ui.error(&format!("Parse error in {}: {}", path.display(), message));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let errors = validate_catalog(&file);

        if self.args.json {
            let diagnostics: Vec<Diagnostic<'_>> = errors.iter().map(Diagnostic::from).collect();
            let json = serde_json::to_string_pretty(&diagnostics)
                .map_err(|e| EnvMatchError::Other(e.into()))?;
            ui.message(&json);
        } else if errors.is_empty() {
            ui.success(&format!(
                "Catalog is valid: {} case(s), {} platform(s)",
                file.cases.len(),
                file.platforms.len()
            ));
            if file.platforms.is_empty() {
                ui.warning("No platforms declared; every check will fail");
            }
        } else {
            for error in &errors {
                ui.error(&format!("[{}] {}", error.rule, error.message));
            }
            ui.message(&format!("{} problem(s) found", errors.len()));
        }

        if errors.is_empty() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
