//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, MatchTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Results go to stdout; warnings and errors go to stderr so that `--json`
/// output stays machine-readable.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: MatchTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            MatchTheme::new()
        } else {
            MatchTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn rejected(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_error(msg)).ok();
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "  {}", self.theme.format_hint(hint)).ok();
        }
    }

    fn detail(&mut self, line: &str) {
        if self.mode.shows_detail() {
            writeln!(self.out, "    {}", self.theme.dim.apply_to(line)).ok();
        }
    }
}

/// Create the terminal UI for the given verbosity.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
