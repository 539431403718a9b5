//! Process execution.
//!
//! Commands are spawned directly from an argv list rather than through a
//! shell, so image names and build arguments never need quoting.

use crate::error::{DockprepError, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Last non-empty line of stderr, for one-line error reports.
    pub fn stderr_tail(&self) -> Option<String> {
        self.stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Capture both streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
        }
    }

    /// Inherit both streams from this process.
    pub fn inherited() -> Self {
        Self::default()
    }
}

/// Something that can run an external program.
///
/// The runtime façades take a `&dyn CommandRunner` so tests can swap in
/// [`MockRunner`](super::MockRunner).
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`];
    /// only a failure to spawn is an `Err`.
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        execute(program, args, options)
    }
}

/// Execute a program with arguments.
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = format_command(program, args);
    tracing::debug!("Executing: {}", command_line);

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::null());

    // Configure stdio
    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|e| DockprepError::CommandFailed {
        command: command_line.clone(),
        code: None,
        detail: Some(e.to_string()),
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        command_line,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a command with captured output and return success/failure.
///
/// Spawn errors count as failure.
pub fn execute_check(runner: &dyn CommandRunner, program: &str, args: &[String]) -> bool {
    runner
        .run(program, args, &CommandOptions::captured())
        .map(|r| r.success)
        .unwrap_or(false)
}

/// Render a command line for logs and error messages.
pub fn format_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
