//! Terminal UI.

use console::Term;
use std::io::Write;

use super::spinner::{LineSpinner, ProgressSpinner};
use super::{OutputMode, SpinnerHandle, Theme, UserInterface};

/// Terminal UI implementation.
///
/// Status goes to stdout, errors to stderr. Animated spinners
/// are only drawn when stdout is a terminal and output is not streamed.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Theme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: Theme::detect(),
            mode,
        }
    }

    /// Check if stdout is an interactive terminal.
    pub fn is_interactive(&self) -> bool {
        self.out.is_term()
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_command_output() {
            writeln!(self.out, "{}", self.theme.dim.apply_to(msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && self.is_interactive() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(LineSpinner::start(message, self.theme.clone()))
        }
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
    }
}
