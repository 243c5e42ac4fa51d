//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`envmatch check`, `envmatch derive`)
//! - Shared catalog loading and error reporting
//! - Consistent global flag handling
//!
//! # Exit codes
//!
//! - `0` compatible / valid
//! - `1` incompatible / invalid
//! - `2` catalog missing or unreadable, or an unknown case or platform

pub mod check;
pub mod derive;
pub mod dispatcher;
pub mod display;
pub mod lint;
pub mod schema;

pub use dispatcher::{CatalogSource, Command, CommandDispatcher, CommandResult};
