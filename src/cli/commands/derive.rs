//! Derive command implementation.
//!
//! `envmatch derive <case>` prints the minimal environment request for a
//! test case, either against a named platform or against the first
//! compatible platform in name order.

use crate::cli::args::DeriveArgs;
use crate::config::Catalog;
use crate::error::{EnvMatchError, Result};
use crate::planner::{plan, plan_first, Plan};
use crate::ui::UserInterface;
use crate::verdict::Incompatible;

use super::display::{request_json, request_yaml, show_trail};
use super::dispatcher::{CatalogSource, Command, CommandResult};

/// The derive command implementation.
pub struct DeriveCommand {
    source: CatalogSource,
    args: DeriveArgs,
}

impl DeriveCommand {
    /// Create a new derive command.
    pub fn new(source: CatalogSource, args: DeriveArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &DeriveArgs {
        &self.args
    }

    fn resolve(&self, catalog: &Catalog) -> Result<std::result::Result<Plan, Incompatible>> {
        let requirement = catalog.case(&self.args.case)?;
        Ok(match &self.args.platform {
            Some(name) => plan(requirement, name.as_str(), catalog.platform(name)?),
            None => plan_first(requirement, &catalog.platforms),
        })
    }
}

impl Command for DeriveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = match self.source.load(ui)? {
            Ok(catalog) => catalog,
            Err(result) => return Ok(result),
        };

        let outcome = match self.resolve(&catalog) {
            Ok(outcome) => outcome,
            Err(e @ (EnvMatchError::UnknownCase { .. } | EnvMatchError::UnknownPlatform { .. })) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        match outcome {
            Ok(plan) => {
                if self.args.json {
                    let request = request_json(&plan.request)?;
                    let report = serde_json::json!({
                        "case": self.args.case,
                        "platform": plan.platform,
                        "request": request,
                    });
                    let json = serde_json::to_string_pretty(&report)
                        .map_err(|e| EnvMatchError::Other(e.into()))?;
                    ui.message(&json);
                } else {
                    ui.show_header(&format!("{} on {}", self.args.case, plan.platform));
                    ui.message(request_yaml(&plan.request)?.trim_end());
                }
                Ok(CommandResult::success())
            }
            Err(incompatible) => {
                if self.args.json {
                    let report = serde_json::json!({
                        "case": self.args.case,
                        "platform": self.args.platform,
                        "incompatible": incompatible.trail(),
                    });
                    let json = serde_json::to_string_pretty(&report)
                        .map_err(|e| EnvMatchError::Other(e.into()))?;
                    ui.message(&json);
                } else {
                    ui.rejected(&format!("{} cannot be satisfied", self.args.case));
                    show_trail(ui, incompatible.trail());
                }
                Ok(CommandResult::failure(1))
            }
        }
    }
}
