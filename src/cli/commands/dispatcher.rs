//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_valid_catalog, Catalog};
use crate::error::{EnvMatchError, Result};
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// The code to hand back to the OS.
    ///
    /// Codes outside `0..=255` cannot be reported faithfully and collapse to
    /// `2`, the generic usage/catalog error.
    pub fn process_code(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(2)
    }
}

/// Where a command finds its catalog.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    pub project_root: PathBuf,
    pub override_path: Option<PathBuf>,
}

impl CatalogSource {
    pub fn new(project_root: &Path, override_path: Option<&Path>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            override_path: override_path.map(Path::to_path_buf),
        }
    }

    /// Load and validate the catalog, reporting load problems through `ui`.
    ///
    /// `Ok(Err(result))` means the problem was already reported and the
    /// command should exit with `result`.
    pub fn load(
        &self,
        ui: &mut dyn UserInterface,
    ) -> Result<std::result::Result<Catalog, CommandResult>> {
        match load_valid_catalog(&self.project_root, self.override_path.as_deref()) {
            Ok(catalog) => Ok(Ok(catalog)),
            Err(EnvMatchError::ConfigNotFound { path }) => {
                ui.error(&format!("No catalog found at {}", path.display()));
                ui.show_hint("Create .envmatch/catalog.yml or pass --config <file>");
                Ok(Err(CommandResult::failure(2)))
            }
            Err(EnvMatchError::ConfigParseError { path, message }) => {
                ui.error(&format!("Parse error in {}: {}", path.display(), message));
                Ok(Err(CommandResult::failure(2)))
            }
            Err(EnvMatchError::ConfigValidationError { message }) => {
                ui.error(&format!("Invalid catalog: {}", message));
                ui.show_hint("Run 'envmatch lint' to list every problem");
                Ok(Err(CommandResult::failure(2)))
            }
            Err(e) => Err(e),
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    source: CatalogSource,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config: Option<PathBuf>) -> Self {
        Self {
            source: CatalogSource {
                project_root,
                override_path: config,
            },
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.source.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Check(args) => {
                super::check::CheckCommand::new(self.source.clone(), args.clone()).execute(ui)
            }
            Commands::Derive(args) => {
                super::derive::DeriveCommand::new(self.source.clone(), args.clone()).execute(ui)
            }
            Commands::Lint(args) => {
                super::lint::LintCommand::new(self.source.clone(), args.clone()).execute(ui)
            }
            Commands::Schema => super::schema::SchemaCommand::new().execute(ui),
        }
    }
}
