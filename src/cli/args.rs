//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// envmatch - match test case requirements against platform capabilities.
#[derive(Debug, Parser)]
#[command(name = "envmatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to catalog file (overrides .envmatch/catalog.yml and skips the local overlay)
    #[arg(short, long, global = true, env = "ENVMATCH_CATALOG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show full verdict trees
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a test case against platforms
    Check(CheckArgs),

    /// Derive the minimal environment request for a test case
    Derive(DeriveArgs),

    /// Validate the catalog, listing every problem
    Lint(LintArgs),

    /// Print the catalog JSON Schema
    Schema,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Test case name
    pub case: String,

    /// Check only this platform
    #[arg(long)]
    pub platform: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `derive` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DeriveArgs {
    /// Test case name
    pub case: String,

    /// Derive against this platform (default: first compatible, by name)
    #[arg(long)]
    pub platform: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LintArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
