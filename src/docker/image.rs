//! Image building.

use crate::config::{DockerConfig, ImageSettings};
use crate::error::{DockprepError, Result};
use crate::shell::{format_command, CommandOptions, CommandRunner};

/// Builds the configured image with `docker build`.
pub struct ImageBuilder<'a> {
    runner: &'a dyn CommandRunner,
    docker: String,
    settings: ImageSettings,
    stream_output: bool,
}

impl<'a> ImageBuilder<'a> {
    /// Create a builder from explicit settings.
    pub fn new(
        runner: &'a dyn CommandRunner,
        docker: impl Into<String>,
        settings: ImageSettings,
        stream_output: bool,
    ) -> Self {
        Self {
            runner,
            docker: docker.into(),
            settings,
            stream_output,
        }
    }

    /// Read image settings from the config. Output streams when verbose.
    pub fn from_config(config: &DockerConfig, runner: &'a dyn CommandRunner) -> Result<Self> {
        Ok(Self::new(
            runner,
            config.docker_binary()?,
            config.extract()?,
            config.verbose(),
        ))
    }

    /// Arguments passed to `docker`.
    pub fn build_args(&self) -> Vec<String> {
        let s = &self.settings;
        let mut args = vec![
            "build".to_string(),
            "-t".to_string(),
            s.image_ref(),
            "-f".to_string(),
            s.dockerfile.clone(),
        ];
        for (key, value) in &s.build_args {
            args.push("--build-arg".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push(s.build_context.clone());
        args
    }

    /// Build the image and return its `name:tag` reference.
    ///
    /// # Errors
    ///
    /// `CommandFailed` when `docker build` cannot be spawned or exits
    /// non-zero; the last stderr line is included when output was captured.
    pub fn build_image(&self) -> Result<String> {
        let args = self.build_args();
        let image = self.settings.image_ref();
        tracing::info!("Building image {}", image);

        let options = if self.stream_output {
            CommandOptions::inherited()
        } else {
            CommandOptions::captured()
        };
        let result = self.runner.run(&self.docker, &args, &options)?;

        if !result.success {
            return Err(DockprepError::CommandFailed {
                command: format_command(&self.docker, &args),
                code: result.exit_code,
                detail: result.stderr_tail(),
            });
        }

        tracing::debug!("Built {} in {:?}", image, result.duration);
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use serde_json::json;

    fn settings(value: serde_json::Value) -> ImageSettings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn build_args_use_defaults() {
        let runner = MockRunner::new();
        let builder = ImageBuilder::new(
            &runner,
            "docker",
            settings(json!({"image_name": "arb-bot"})),
            false,
        );

        assert_eq!(
            builder.build_args(),
            vec!["build", "-t", "arb-bot:latest", "-f", "Dockerfile", "."]
        );
    }

    #[test]
    fn build_args_include_sorted_build_args() {
        let runner = MockRunner::new();
        let builder = ImageBuilder::new(
            &runner,
            "docker",
            settings(json!({
                "image_name": "arb-bot",
                "image_tag": "v2",
                "dockerfile": "docker/Dockerfile.prod",
                "build_context": "..",
                "build_args": {"RUST_VERSION": "1.80", "APP_ENV": "prod"}
            })),
            false,
        );

        assert_eq!(
            builder.build_args(),
            vec![
                "build",
                "-t",
                "arb-bot:v2",
                "-f",
                "docker/Dockerfile.prod",
                "--build-arg",
                "APP_ENV=prod",
                "--build-arg",
                "RUST_VERSION=1.80",
                ".."
            ]
        );
    }

    #[test]
    fn build_image_returns_reference() {
        let runner = MockRunner::new();
        let builder =
            ImageBuilder::new(&runner, "docker", settings(json!({"image_name": "app"})), false);

        assert_eq!(builder.build_image().unwrap(), "app:latest");
        assert_eq!(runner.count("docker build"), 1);
        assert!(runner.calls()[0].captured);
    }

    #[test]
    fn build_image_streams_when_verbose() {
        let runner = MockRunner::new();
        let builder =
            ImageBuilder::new(&runner, "docker", settings(json!({"image_name": "app"})), true);

        builder.build_image().unwrap();
        assert!(!runner.calls()[0].captured);
    }

    #[test]
    fn build_failure_carries_stderr_tail() {
        let runner = MockRunner::new();
        runner.fail_with(
            "docker build",
            1,
            "#5 ERROR\nfailed to solve: Dockerfile not found\n",
        );
        let builder =
            ImageBuilder::new(&runner, "docker", settings(json!({"image_name": "app"})), false);

        let err = builder.build_image().unwrap_err();
        match err {
            DockprepError::CommandFailed { code, detail, .. } => {
                assert_eq!(code, Some(1));
                assert_eq!(
                    detail.as_deref(),
                    Some("failed to solve: Dockerfile not found")
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn from_config_requires_image_name() {
        let config = DockerConfig::new(json!({}).as_object().unwrap().clone());
        let runner = MockRunner::new();
        let err = ImageBuilder::from_config(&config, &runner).err().unwrap();
        assert!(err.to_string().contains("image_name"));
    }
}
