//! Recording command runner for tests.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every invocation and answers with pre-configured results keyed by
//! command-line prefix.
//!
//! # Example
//!
//! ```
//! use dockprep::shell::{CommandOptions, CommandRunner, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.fail_with("docker info", 1, "Cannot connect to the Docker daemon");
//!
//! let info = runner
//!     .run("docker", &["info".to_string()], &CommandOptions::captured())
//!     .unwrap();
//! assert!(!info.success);
//! assert_eq!(runner.command_lines(), vec!["docker info"]);
//! ```

use std::cell::RefCell;
use std::time::Duration;

use crate::error::{DockprepError, Result};

use super::command::{format_command, CommandOptions, CommandResult, CommandRunner};

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    /// Program name as passed to the runner.
    pub program: String,
    /// Arguments as passed to the runner.
    pub args: Vec<String>,
    /// Whether stdout was captured.
    pub captured: bool,
}

impl RecordedCommand {
    /// The full command line, space-joined.
    pub fn line(&self) -> String {
        format_command(&self.program, &self.args)
    }
}

#[derive(Debug, Clone)]
enum Response {
    Result(CommandResult),
    SpawnError(String),
}

/// Mock command runner.
///
/// Unmatched commands succeed with empty output. When several prefixes
/// match, the most recently registered one wins.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: RefCell<Vec<(String, Response)>>,
    calls: RefCell<Vec<RecordedCommand>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed with the given stdout for commands starting with `prefix`.
    pub fn succeed_with(&self, prefix: &str, stdout: &str) {
        self.responses.borrow_mut().push((
            prefix.to_string(),
            Response::Result(CommandResult::success(
                stdout.to_string(),
                String::new(),
                Duration::ZERO,
            )),
        ));
    }

    /// Exit with `code` and the given stderr for commands starting with `prefix`.
    pub fn fail_with(&self, prefix: &str, code: i32, stderr: &str) {
        self.responses.borrow_mut().push((
            prefix.to_string(),
            Response::Result(CommandResult::failure(
                Some(code),
                String::new(),
                stderr.to_string(),
                Duration::ZERO,
            )),
        ));
    }

    /// Fail to spawn commands starting with `prefix`.
    pub fn spawn_error(&self, prefix: &str, message: &str) {
        self.responses
            .borrow_mut()
            .push((prefix.to_string(), Response::SpawnError(message.to_string())));
    }

    /// All recorded invocations, in order.
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.borrow().clone()
    }

    /// All recorded command lines, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(RecordedCommand::line).collect()
    }

    /// Number of recorded command lines starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }
}

impl CommandRunner for MockRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        let recorded = RecordedCommand {
            program: program.to_string(),
            args: args.to_vec(),
            captured: options.capture_stdout,
        };
        let line = recorded.line();
        self.calls.borrow_mut().push(recorded);

        let response = self
            .responses
            .borrow()
            .iter()
            .rev()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone());

        match response {
            Some(Response::Result(result)) => Ok(result),
            Some(Response::SpawnError(message)) => Err(DockprepError::CommandFailed {
                command: line,
                code: None,
                detail: Some(message),
            }),
            None => Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
        }
    }
}
