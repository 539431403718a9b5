//! Test suite runner.

use crate::config::{DockerConfig, TestSettings};
use crate::error::{DockprepError, Result};
use crate::shell::{CommandOptions, CommandRunner};

/// Runs the configured test command with output passed through.
pub struct TestSuite<'a> {
    runner: &'a dyn CommandRunner,
    command: Vec<String>,
}

impl<'a> TestSuite<'a> {
    /// Create a suite for the given argv.
    pub fn new(runner: &'a dyn CommandRunner, command: Vec<String>) -> Self {
        Self { runner, command }
    }

    /// Read `test_command` from the config.
    pub fn from_config(config: &DockerConfig, runner: &'a dyn CommandRunner) -> Result<Self> {
        let settings: TestSettings = config.extract()?;
        Ok(Self::new(runner, settings.test_command))
    }

    /// Run the tests.
    ///
    /// # Errors
    ///
    /// `TestsFailed` on a non-zero exit, `CommandFailed` if the command
    /// cannot be spawned, `ConfigValidationError` if the command is empty.
    pub fn run(&self) -> Result<()> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(DockprepError::ConfigValidationError {
                message: "test_command must name a program".to_string(),
            });
        };

        tracing::info!("Running tests: {}", self.command.join(" "));
        let result = self
            .runner
            .run(program, args, &CommandOptions::inherited())?;

        if result.success {
            Ok(())
        } else {
            Err(DockprepError::TestsFailed {
                code: result.exit_code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn run_passes_command_through() {
        let runner = MockRunner::new();
        TestSuite::new(&runner, argv(&["cargo", "test", "--workspace"]))
            .run()
            .unwrap();

        assert_eq!(runner.command_lines(), vec!["cargo test --workspace"]);
        assert!(!runner.calls()[0].captured);
    }

    #[test]
    fn failing_tests_report_exit_code() {
        let runner = MockRunner::new();
        runner.fail_with("pytest", 2, "");

        let err = TestSuite::new(&runner, argv(&["pytest"])).run().unwrap_err();
        assert!(matches!(err, DockprepError::TestsFailed { code: Some(2) }));
    }

    #[test]
    fn empty_command_is_rejected() {
        let runner = MockRunner::new();
        let err = TestSuite::new(&runner, Vec::new()).run().unwrap_err();
        assert!(matches!(err, DockprepError::ConfigValidationError { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn from_config_requires_test_command() {
        let config = DockerConfig::new(serde_json::Map::new());
        let runner = MockRunner::new();
        assert!(TestSuite::from_config(&config, &runner).is_err());
    }
}
