//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use envmatch::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("2 platforms");
//! ui.success("azure");
//!
//! assert!(ui.has_message("platforms"));
//! assert_eq!(ui.successes(), ["azure".to_string()]);
//! ```

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    rejections: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    details: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured rejections.
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured hints.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Get all captured detail lines.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Check if any message contains the given text.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if any success message contains the given text.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if any error message contains the given text.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if any warning contains the given text.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if any detail line contains the given text.
    pub fn has_detail(&self, msg: &str) -> bool {
        self.details.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn rejected(&mut self, msg: &str) {
        self.rejections.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn detail(&mut self, line: &str) {
        if self.mode.shows_detail() {
            self.details.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_each_channel() {
        let mut ui = MockUI::new();
        ui.message("m");
        ui.success("s");
        ui.warning("w");
        ui.error("e");
        ui.rejected("r");
        ui.show_header("h");
        ui.show_hint("hint");
        ui.detail("d");

        assert_eq!(ui.messages(), ["m".to_string()]);
        assert!(ui.has_success("s"));
        assert!(ui.has_warning("w"));
        assert!(ui.has_error("e"));
        assert_eq!(ui.rejections(), ["r".to_string()]);
        assert_eq!(ui.headers(), ["h".to_string()]);
        assert_eq!(ui.hints(), ["hint".to_string()]);
        assert!(ui.has_detail("d"));
    }

    #[test]
    fn quiet_mode_drops_details() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ui.detail("nodes[0].core_count: 10 not in [4, 8]");
        assert!(ui.details().is_empty());
    }
}
