//! Output verbosity.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show full verdict trees and derived requests.
    Verbose,
    /// Show one line per platform plus failure paths.
    #[default]
    Normal,
    /// Show final status only.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Whether per-field detail (failure paths, rendered trees) is shown.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Whether the full multi-line verdict tree is shown.
    pub fn shows_tree(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether status messages are shown.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
