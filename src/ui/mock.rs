//! Recording UI for unit tests.
//!
//! ```
//! use dockprep::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Checking prerequisites");
//! ui.success("Environment ready");
//!
//! assert!(ui.has_message("prerequisites"));
//! assert!(ui.has_success("ready"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Captures everything written to it.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    details: Vec<String>,
    successes: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<Rc<RefCell<MockSpinner>>>,
}

impl MockUI {
    /// A recorder in Normal mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder reporting `mode`.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Verbose-only lines passed to `detail`, in order.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Titles passed to `show_header`.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Starting message of every spinner, in order.
    pub fn spinners(&self) -> Vec<String> {
        self.spinners
            .iter()
            .map(|s| s.borrow().start_message.clone())
            .collect()
    }

    /// Snapshot of the spinner at `index`.
    pub fn spinner(&self, index: usize) -> Option<MockSpinner> {
        self.spinners.get(index).map(|s| s.borrow().clone())
    }

    /// Whether any plain message contains `msg`.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Whether any success line contains `msg`.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn detail(&mut self, msg: &str) {
        self.details.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let state = Rc::new(RefCell::new(MockSpinner {
            start_message: message.to_string(),
            ..Default::default()
        }));
        self.spinners.push(Rc::clone(&state));
        Box::new(SharedSpinner(state))
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}

/// Recorded state of a spinner started on a [`MockUI`].
#[derive(Debug, Clone, Default)]
pub struct MockSpinner {
    start_message: String,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
}

/// How a mock spinner was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
}

impl MockSpinner {
    /// Message passed to `finish_success` or `finish_error`.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// `None` while the spinner is still running.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

struct SharedSpinner(Rc<RefCell<MockSpinner>>);

impl SharedSpinner {
    fn finish(&mut self, msg: &str, status: SpinnerStatus) {
        let mut state = self.0.borrow_mut();
        state.finish_message = Some(msg.to_string());
        state.status = Some(status);
    }
}

impl SpinnerHandle for SharedSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_detail_lines_regardless_of_mode() {
        let mut ui = MockUI::new();
        ui.detail("a.txt : /cfg/a.txt");
        assert_eq!(ui.details(), &["a.txt : /cfg/a.txt"]);
    }

    #[test]
    fn error_lines_are_not_successes() {
        let mut ui = MockUI::new();
        ui.error("Missing dependencies: docker, git");
        assert!(!ui.has_success("docker"));
        assert_eq!(ui.errors, vec!["Missing dependencies: docker, git"]);
    }

    #[test]
    fn spinner_outcome_survives_the_handle() {
        let mut ui = MockUI::new();
        ui.start_spinner("Building image").finish_success("Built app:latest");
        let _running = ui.start_spinner("Creating container");

        assert_eq!(ui.spinners(), vec!["Building image", "Creating container"]);
        assert_eq!(ui.spinner(0).unwrap().status(), Some(SpinnerStatus::Success));
        assert_eq!(ui.spinner(0).unwrap().finish_message(), Some("Built app:latest"));
        assert_eq!(ui.spinner(1).unwrap().status(), None);
        assert!(ui.spinner(2).is_none());
    }
}
