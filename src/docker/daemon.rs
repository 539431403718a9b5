//! Docker daemon bootstrap.
//!
//! There is no readiness polling after a start: if the start command returns
//! before the daemon accepts connections, later stages see that as their own
//! failure.

use std::cell::Cell;

use crate::config::{keys, DockerConfig};
use crate::error::{DockprepError, Result};
use crate::shell::{execute_check, format_command, CommandOptions, CommandRunner};

/// Reports and changes container daemon state.
pub trait DaemonControl {
    /// Whether the daemon currently answers requests.
    fn is_running(&self) -> bool;

    /// Start the daemon.
    fn start(&self) -> Result<()>;
}

/// Daemon control through the `docker` CLI and the host service manager.
///
/// `docker_binary` and `docker_start_command` are read when the daemon is
/// queried or started, so a malformed value only surfaces at that step.
pub struct DockerDaemon<'a> {
    config: &'a DockerConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> DockerDaemon<'a> {
    /// Create daemon control backed by `config`.
    pub fn new(config: &'a DockerConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// The configured start command, or [`default_start_command`].
    pub fn start_command(&self) -> Result<Vec<String>> {
        let argv = match self
            .config
            .get_optional_string_list(keys::DOCKER_START_COMMAND)?
        {
            Some(argv) => argv,
            None => default_start_command().ok_or_else(|| DockprepError::DaemonStart {
                message: format!(
                    "no default start command on this platform; set '{}'",
                    keys::DOCKER_START_COMMAND
                ),
            })?,
        };

        if argv.is_empty() {
            return Err(DockprepError::DaemonStart {
                message: format!("'{}' is empty", keys::DOCKER_START_COMMAND),
            });
        }
        Ok(argv)
    }
}

impl DaemonControl for DockerDaemon<'_> {
    fn is_running(&self) -> bool {
        match self.config.docker_binary() {
            Ok(docker) => execute_check(self.runner, &docker, &["info".to_string()]),
            Err(e) => {
                tracing::debug!("Cannot query Docker daemon: {}", e);
                false
            }
        }
    }

    fn start(&self) -> Result<()> {
        // is_running swallows a malformed docker_binary; report it here.
        self.config.docker_binary()?;
        let argv = self.start_command()?;
        let (program, args) = argv.split_at(1);
        let command_line = format_command(&program[0], args);
        tracing::info!("Starting Docker daemon: {}", command_line);

        let result = self
            .runner
            .run(&program[0], args, &CommandOptions::inherited())
            .map_err(|e| DockprepError::DaemonStart {
                message: e.to_string(),
            })?;

        if result.success {
            Ok(())
        } else {
            Err(DockprepError::DaemonStart {
                message: format!(
                    "`{}` exited with code {:?}",
                    command_line, result.exit_code
                ),
            })
        }
    }
}

/// The platform's usual way to start Docker, if there is one.
pub fn default_start_command() -> Option<Vec<String>> {
    let argv: &[&str] = if cfg!(target_os = "linux") {
        &["systemctl", "start", "docker"]
    } else if cfg!(target_os = "macos") {
        &["open", "--background", "-a", "Docker"]
    } else {
        return None;
    };
    Some(argv.iter().map(|s| s.to_string()).collect())
}

/// In-memory daemon for tests.
///
/// Counts calls so tests can assert how often the daemon was queried and
/// started. A successful `start` flips it to running.
#[derive(Debug, Default)]
pub struct MockDaemon {
    running: Cell<bool>,
    start_error: Option<String>,
    status_calls: Cell<usize>,
    start_calls: Cell<usize>,
}

impl MockDaemon {
    /// A daemon that is already running.
    pub fn running() -> Self {
        Self {
            running: Cell::new(true),
            ..Default::default()
        }
    }

    /// A stopped daemon that starts successfully.
    pub fn stopped() -> Self {
        Self::default()
    }

    /// A stopped daemon whose start fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            start_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Number of `is_running` calls.
    pub fn status_calls(&self) -> usize {
        self.status_calls.get()
    }

    /// Number of `start` calls.
    pub fn start_calls(&self) -> usize {
        self.start_calls.get()
    }
}

impl DaemonControl for MockDaemon {
    fn is_running(&self) -> bool {
        self.status_calls.set(self.status_calls.get() + 1);
        self.running.get()
    }

    fn start(&self) -> Result<()> {
        self.start_calls.set(self.start_calls.get() + 1);
        match &self.start_error {
            Some(message) => Err(DockprepError::DaemonStart {
                message: message.clone(),
            }),
            None => {
                self.running.set(true);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use serde_json::{json, Value};

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn config(values: Value) -> DockerConfig {
        DockerConfig::new(values.as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn is_running_asks_docker_info() {
        let runner = MockRunner::new();
        let config = config(json!({}));
        let daemon = DockerDaemon::new(&config, &runner);

        assert!(daemon.is_running());
        assert_eq!(runner.command_lines(), vec!["docker info"]);
        assert!(runner.calls()[0].captured);
    }

    #[test]
    fn is_running_false_when_info_fails() {
        let runner = MockRunner::new();
        runner.fail_with("docker info", 1, "Cannot connect to the Docker daemon");
        let config = config(json!({}));

        assert!(!DockerDaemon::new(&config, &runner).is_running());
    }

    #[test]
    fn is_running_false_when_binary_missing() {
        let runner = MockRunner::new();
        runner.spawn_error("docker", "No such file or directory");
        let config = config(json!({}));

        assert!(!DockerDaemon::new(&config, &runner).is_running());
    }

    #[test]
    fn is_running_uses_configured_binary() {
        let runner = MockRunner::new();
        let config = config(json!({"docker_binary": "/opt/bin/docker"}));
        DockerDaemon::new(&config, &runner).is_running();
        assert_eq!(runner.command_lines(), vec!["/opt/bin/docker info"]);
    }

    #[test]
    fn construction_does_not_read_config() {
        let runner = MockRunner::new();
        let config = config(json!({"docker_binary": 7, "docker_start_command": 5}));
        let daemon = DockerDaemon::new(&config, &runner);

        assert!(!daemon.is_running());
        assert!(runner.calls().is_empty());
        assert!(matches!(
            daemon.start(),
            Err(DockprepError::ConfigKeyType { .. })
        ));
    }

    #[test]
    fn wrong_typed_start_command_fails_on_start() {
        let runner = MockRunner::new();
        let config = config(json!({"docker_start_command": 5}));
        let daemon = DockerDaemon::new(&config, &runner);

        let err = daemon.start().unwrap_err();
        assert!(err.to_string().contains("docker_start_command"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn start_runs_configured_command_with_inherited_output() {
        let runner = MockRunner::new();
        let config = config(json!({"docker_start_command": ["sudo", "service", "docker", "start"]}));

        DockerDaemon::new(&config, &runner).start().unwrap();
        assert_eq!(runner.command_lines(), vec!["sudo service docker start"]);
        assert!(!runner.calls()[0].captured);
    }

    #[test]
    fn start_failure_is_daemon_start_error() {
        let runner = MockRunner::new();
        runner.fail_with("sudo", 1, "");
        let config = config(json!({"docker_start_command": ["sudo", "dockerd"]}));

        let err = DockerDaemon::new(&config, &runner).start().unwrap_err();
        assert!(matches!(err, DockprepError::DaemonStart { .. }));
        assert!(err.to_string().contains("sudo dockerd"));
    }

    #[test]
    fn start_spawn_error_is_daemon_start_error() {
        let runner = MockRunner::new();
        runner.spawn_error("nope", "No such file or directory");
        let config = config(json!({"docker_start_command": ["nope"]}));

        assert!(matches!(
            DockerDaemon::new(&config, &runner).start(),
            Err(DockprepError::DaemonStart { .. })
        ));
    }

    #[test]
    fn empty_start_command_is_rejected() {
        let runner = MockRunner::new();
        let config = config(json!({"docker_start_command": []}));

        let err = DockerDaemon::new(&config, &runner).start().unwrap_err();
        assert!(err.to_string().contains("docker_start_command"));
        assert!(runner.calls().is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn default_start_command_on_linux_uses_systemctl() {
        assert_eq!(
            default_start_command(),
            Some(argv(&["systemctl", "start", "docker"]))
        );
        let runner = MockRunner::new();
        let config = config(json!({}));
        assert_eq!(
            DockerDaemon::new(&config, &runner).start_command().unwrap(),
            argv(&["systemctl", "start", "docker"])
        );
    }

    #[test]
    fn reads_binary_and_start_command_from_config() {
        let runner = MockRunner::new();
        let config = config(json!({
            "docker_binary": "podman",
            "docker_start_command": ["podman", "machine", "start"]
        }));
        let daemon = DockerDaemon::new(&config, &runner);

        daemon.is_running();
        daemon.start().unwrap();
        assert_eq!(
            runner.command_lines(),
            vec!["podman info", "podman machine start"]
        );
    }

    #[test]
    fn mock_daemon_counts_calls() {
        let daemon = MockDaemon::stopped();
        assert!(!daemon.is_running());
        daemon.start().unwrap();
        assert!(daemon.is_running());
        assert_eq!(daemon.status_calls(), 2);
        assert_eq!(daemon.start_calls(), 1);
    }
}
