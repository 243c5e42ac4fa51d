//! Shared display helpers for verdicts and derived requests.
//!
//! Used by `check` and `derive` so that both render candidates and
//! incompatibility trails the same way.

use crate::case::CaseSpec;
use crate::config::CaseConfig;
use crate::error::{EnvMatchError, Result};
use crate::planner::Candidate;
use crate::ui::UserInterface;
use crate::verdict::VerdictTrail;

/// Print the failure detail of a trail.
///
/// Verbose mode shows the nested tree; otherwise one `path: reason` line per
/// failure.
pub fn show_trail(ui: &mut dyn UserInterface, trail: &VerdictTrail) {
    if trail.is_pass() {
        return;
    }
    if ui.output_mode().shows_tree() {
        for line in trail.render().lines() {
            ui.detail(line);
        }
    } else {
        for failure in trail.failures() {
            ui.detail(&failure);
        }
    }
}

/// Print one candidate line, followed by its failures.
pub fn show_candidate(ui: &mut dyn UserInterface, candidate: &Candidate) {
    if candidate.is_compatible() {
        ui.success(&candidate.name);
    } else {
        ui.rejected(&candidate.name);
        show_trail(ui, &candidate.verdict);
    }
}

/// Render a derived request in catalog YAML.
pub fn request_yaml(request: &CaseSpec) -> Result<String> {
    serde_yaml::to_string(&CaseConfig::from(request)).map_err(|e| EnvMatchError::Other(e.into()))
}

/// Render a derived request as a JSON value.
pub fn request_json(request: &CaseSpec) -> Result<serde_json::Value> {
    serde_json::to_value(CaseConfig::from(request)).map_err(|e| EnvMatchError::Other(e.into()))
}
