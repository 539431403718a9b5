//! Container creation.

use crate::config::{ContainerSettings, DockerConfig};
use crate::error::{DockprepError, Result};
use crate::shell::{format_command, CommandOptions, CommandRunner};

/// Creates containers with `docker create`.
///
/// The container is only created, never started or removed.
pub struct ContainerManager<'a> {
    runner: &'a dyn CommandRunner,
    docker: String,
    settings: ContainerSettings,
}

impl<'a> ContainerManager<'a> {
    /// Create a manager from explicit settings.
    pub fn new(
        runner: &'a dyn CommandRunner,
        docker: impl Into<String>,
        settings: ContainerSettings,
    ) -> Self {
        Self {
            runner,
            docker: docker.into(),
            settings,
        }
    }

    /// Read container settings from the config.
    pub fn from_config(config: &DockerConfig, runner: &'a dyn CommandRunner) -> Result<Self> {
        Ok(Self::new(runner, config.docker_binary()?, config.extract()?))
    }

    /// Arguments passed to `docker` for the given image.
    pub fn create_args(&self, image: &str) -> Vec<String> {
        let mut args = vec!["create".to_string()];
        if let Some(name) = &self.settings.container_name {
            args.push("--name".to_string());
            args.push(name.clone());
        }
        args.extend(self.settings.container_options.iter().cloned());
        args.push(image.to_string());
        args
    }

    /// Create a container from `image` and return its id.
    pub fn create_container(&self, image: &str) -> Result<String> {
        let args = self.create_args(image);
        tracing::info!("Creating container from {}", image);

        let result = self
            .runner
            .run(&self.docker, &args, &CommandOptions::captured())?;

        if !result.success {
            return Err(DockprepError::CommandFailed {
                command: format_command(&self.docker, &args),
                code: result.exit_code,
                detail: result.stderr_tail(),
            });
        }

        let id = result.stdout.trim().to_string();
        if id.is_empty() {
            return Err(anyhow::anyhow!(
                "`{}` succeeded but printed no container id",
                format_command(&self.docker, &args)
            )
            .into());
        }
        tracing::debug!("Created container {}", id);
        Ok(id)
    }
}
