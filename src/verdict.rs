//! Match verdicts and their diagnostic trail.
//!
//! Every check returns a [`VerdictTrail`]: a pass/fail flag, the reasons
//! recorded at that level, and the failing sub-verdicts keyed by the field
//! or position they came from. Trails nest as the engine walks a descriptor
//! tree, so a failure deep inside a fleet surfaces as a path such as
//! `environment.nodes[1].core_count`.
//!
//! Passing branches carry no information and are folded away on merge.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A pass/fail verdict annotated with a named tree of failing sub-verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictTrail {
    passed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reasons: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    branches: Vec<Branch>,
}

/// A named failing sub-verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    /// Field name or position (`core_count`, `nodes[2]`).
    pub name: String,
    /// The verdict recorded under that name.
    pub trail: VerdictTrail,
}

impl Default for VerdictTrail {
    fn default() -> Self {
        Self::pass()
    }
}

impl VerdictTrail {
    /// A passing verdict with nothing to report.
    pub fn pass() -> Self {
        Self {
            passed: true,
            reasons: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// A failing verdict with a single reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reasons: vec![reason.into()],
            branches: Vec::new(),
        }
    }

    /// Whether the requirement is satisfied.
    pub fn is_pass(&self) -> bool {
        self.passed
    }

    /// Reasons recorded directly at this level.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Failing sub-verdicts, in the order they were merged.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Look up a failing sub-verdict by name.
    pub fn branch(&self, name: &str) -> Option<&VerdictTrail> {
        self.branches
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.trail)
    }

    /// Record a failure at this level.
    pub fn add_failure(&mut self, reason: impl Into<String>) {
        self.passed = false;
        self.reasons.push(reason.into());
    }

    /// AND another verdict into this one under `name`.
    pub fn merge(&mut self, name: impl Into<String>, other: VerdictTrail) {
        if other.passed {
            return;
        }
        self.passed = false;
        self.branches.push(Branch {
            name: name.into(),
            trail: other,
        });
    }

    /// Builder form of [`merge`](Self::merge).
    pub fn and(mut self, name: impl Into<String>, other: VerdictTrail) -> Self {
        self.merge(name, other);
        self
    }

    /// Flattened `path: reason` lines for every failure in the tree.
    pub fn failures(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_failures("", &mut out);
        out
    }

    fn collect_failures(&self, prefix: &str, out: &mut Vec<String>) {
        for reason in &self.reasons {
            if prefix.is_empty() {
                out.push(reason.clone());
            } else {
                out.push(format!("{}: {}", prefix, reason));
            }
        }
        for branch in &self.branches {
            let path = if prefix.is_empty() {
                branch.name.clone()
            } else {
                format!("{}.{}", prefix, branch.name)
            };
            branch.trail.collect_failures(&path, out);
        }
    }

    /// One-line summary suitable for log messages.
    pub fn summary(&self) -> String {
        if self.passed {
            "compatible".to_string()
        } else {
            self.failures().join("; ")
        }
    }

    /// Multi-line tree rendering, two spaces per level.
    pub fn render(&self) -> String {
        if self.passed {
            return "compatible".to_string();
        }
        let mut lines = Vec::new();
        self.render_into(0, &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        for reason in &self.reasons {
            lines.push(format!("{}{}", indent, reason));
        }
        for branch in &self.branches {
            lines.push(format!("{}{}:", indent, branch.name));
            branch.trail.render_into(depth + 1, lines);
        }
    }
}

impl fmt::Display for VerdictTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// The tagged "no result" outcome of a derivation.
///
/// Carries the failing trail so callers can report why nothing was derived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("requirement not satisfiable: {}", .trail.summary())]
pub struct Incompatible {
    trail: VerdictTrail,
}

impl Incompatible {
    /// Wrap a failing trail.
    pub fn new(trail: VerdictTrail) -> Self {
        Self { trail }
    }

    /// Shorthand for an incompatibility with a single reason.
    pub fn because(reason: impl Into<String>) -> Self {
        Self::new(VerdictTrail::fail(reason))
    }

    /// The trail explaining the incompatibility.
    pub fn trail(&self) -> &VerdictTrail {
        &self.trail
    }

    /// Consume into the underlying trail.
    pub fn into_trail(self) -> VerdictTrail {
        self.trail
    }
}
