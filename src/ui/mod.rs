//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal output
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use envmatch::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Silent);
//! ui.show_header("smoke");
//! ui.success("libvirt");
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, MatchTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a negative result, such as an incompatible platform.
    ///
    /// Unlike [`error`](Self::error) this is ordinary output.
    fn rejected(&mut self, msg: &str);

    /// Show a section header.
    fn show_header(&mut self, title: &str);

    /// Show a follow-up hint.
    fn show_hint(&mut self, hint: &str);

    /// Show an indented detail line, such as one failure path.
    fn detail(&mut self, line: &str);
}
