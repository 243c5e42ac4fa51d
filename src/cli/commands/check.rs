//! Check command implementation.
//!
//! `envmatch check <case>` evaluates a test case against every platform in
//! the catalog (or one named platform) and reports the verdicts.

use crate::cli::args::CheckArgs;
use crate::config::Catalog;
use crate::error::{EnvMatchError, Result};
use crate::planner::{evaluate, Candidate};
use crate::ui::UserInterface;

use super::display::show_candidate;
use super::dispatcher::{CatalogSource, Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    source: CatalogSource,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(source: CatalogSource, args: CheckArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn candidates(&self, catalog: &Catalog) -> Result<Vec<Candidate>> {
        let requirement = catalog.case(&self.args.case)?;
        match &self.args.platform {
            Some(name) => {
                let platform = catalog.platform(name)?;
                Ok(evaluate(requirement, [(name.as_str(), platform)]))
            }
            None => Ok(evaluate(requirement, &catalog.platforms)),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = match self.source.load(ui)? {
            Ok(catalog) => catalog,
            Err(result) => return Ok(result),
        };

        let candidates = match self.candidates(&catalog) {
            Ok(candidates) => candidates,
            Err(e @ (EnvMatchError::UnknownCase { .. } | EnvMatchError::UnknownPlatform { .. })) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };
        let compatible = candidates.iter().filter(|c| c.is_compatible()).count();

        if self.args.json {
            let report = serde_json::json!({
                "case": self.args.case,
                "compatible": compatible > 0,
                "candidates": candidates,
            });
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| EnvMatchError::Other(e.into()))?;
            ui.message(&json);
        } else {
            ui.show_header(&self.args.case);
            if candidates.is_empty() {
                ui.warning("No platforms declared in the catalog");
            }
            for candidate in &candidates {
                show_candidate(ui, candidate);
            }
            ui.message(&format!(
                "{} of {} platform(s) compatible",
                compatible,
                candidates.len()
            ));
        }

        if compatible > 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
cases:
  pair:
    nodes:
      - core_count: {min: 4, max: 8}
        count: 2
    operating_system: {allow: [linux]}
platforms:
  big:
    nodes:
      - core_count: 10
        count: 2
    operating_system: {allow: [linux]}
  duo:
    nodes:
      - core_count: 6
        count: 2
    operating_system: {allow: [linux, windows]}
  solo:
    nodes:
      - core_count: 6
"#;

    fn setup_project(catalog: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".envmatch");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("catalog.yml"), catalog).unwrap();
        temp
    }

    fn command(root: &Path, args: CheckArgs) -> CheckCommand {
        CheckCommand::new(CatalogSource::new(root, None), args)
    }

    fn args(case: &str, platform: Option<&str>) -> CheckArgs {
        CheckArgs {
            case: case.to_string(),
            platform: platform.map(str::to_string),
            json: false,
        }
    }

    #[test]
    fn reports_every_platform() {
        let temp = setup_project(CATALOG);
        let mut ui = MockUI::new();

        let result = command(temp.path(), args("pair", None)).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.successes(), ["duo".to_string()]);
        assert_eq!(ui.rejections(), ["big".to_string(), "solo".to_string()]);
        assert!(ui.has_detail("environment.nodes[0].core_count: 10 not in [4, 8]"));
        assert!(ui.has_detail(
            "environment: insufficient machine count: requires 2, capability offers 1"
        ));
        assert!(ui.has_message("1 of 3 platform(s) compatible"));
    }

    #[test]
    fn named_incompatible_platform_exits_one() {
        let temp = setup_project(CATALOG);
        let mut ui = MockUI::new();

        let result = command(temp.path(), args("pair", Some("big")))
            .execute(&mut ui)
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_detail("nodes[1].core_count"));
    }

    #[test]
    fn unknown_case_exits_two() {
        let temp = setup_project(CATALOG);
        let mut ui = MockUI::new();

        let result = command(temp.path(), args("missing", None))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Unknown case: missing"));
    }

    #[test]
    fn json_output_lists_candidates() {
        let temp = setup_project(CATALOG);
        let mut ui = MockUI::new();
        let args = CheckArgs {
            json: true,
            ..args("pair", None)
        };

        command(temp.path(), args).execute(&mut ui).unwrap();

        let report: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(report["compatible"], true);
        assert_eq!(report["candidates"][1]["name"], "duo");
        assert_eq!(report["candidates"][1]["verdict"]["passed"], true);
        assert_eq!(report["candidates"][0]["verdict"]["passed"], false);
    }
}
