//! Run command implementation.
//!
//! Prepares the environment, then runs whichever of the build, create and
//! test stages were selected. Each stage assumes the previous one succeeded;
//! the first error ends the run and nothing already done is rolled back.

use crate::cli::args::{Cli, Stages};
use crate::config::{keys, load_config, DockerConfig};
use crate::docker::{ContainerManager, DaemonControl, DockerDaemon, ImageBuilder, TestSuite};
use crate::error::{DockprepError, Result};
use crate::requirements::{resolve_required_file, DependencyChecker, ExecutableLookup, SearchPath};
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::Command;

/// The run command implementation.
pub struct RunCommand {
    config: DockerConfig,
    stages: Stages,
}

impl RunCommand {
    /// Create a run command from an already-loaded configuration.
    pub fn new(config: DockerConfig, stages: Stages) -> Self {
        Self { config, stages }
    }

    /// Load the configuration named on the command line.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = load_config(&cli.config, cli.verbose, cli.logging)?;
        Ok(Self::new(config, cli.stages()))
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &DockerConfig {
        &self.config
    }

    /// Get the selected stages.
    pub fn stages(&self) -> Stages {
        self.stages
    }

    /// Execute against explicit runtime collaborators.
    pub fn execute_with(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn CommandRunner,
        lookup: &dyn ExecutableLookup,
        daemon: &dyn DaemonControl,
    ) -> Result<()> {
        ui.show_header("dockprep");

        self.prepare(ui, lookup, daemon)?;

        let mut image = None;
        if self.stages.build_image {
            image = Some(self.build(ui, runner)?);
        }

        if self.stages.create_container {
            let image = image.as_deref().ok_or(DockprepError::ImageNotBuilt)?;
            self.create(ui, runner, image)?;
        }

        if self.stages.run_tests {
            ui.message("Running test suite");
            TestSuite::from_config(&self.config, runner)?.run()?;
            ui.success("Test suite passed");
        }

        ui.success("Docker environment setup completed successfully.");
        Ok(())
    }

    fn prepare(
        &self,
        ui: &mut dyn UserInterface,
        lookup: &dyn ExecutableLookup,
        daemon: &dyn DaemonControl,
    ) -> Result<()> {
        ui.message("Checking prerequisites");
        let checker = DependencyChecker::new(&self.config, lookup, daemon);

        checker.check_dependencies()?;
        self.show_required_files(ui);
        checker.check_required_files()?;
        checker.ensure_daemon()?;
        ui.success("Environment ready");
        Ok(())
    }

    /// List how each required file resolves, in verbose mode.
    ///
    /// Config errors are left for the checker to report.
    fn show_required_files(&self, ui: &mut dyn UserInterface) {
        if !ui.output_mode().shows_command_output() {
            return;
        }
        let (Ok(dir), Ok(entries)) = (
            self.config.get_str(keys::CONFIG_FILES_DIR),
            self.config.get_string_list(keys::REQUIRED_CONFIG_FILES),
        ) else {
            return;
        };
        for entry in entries {
            let resolved = resolve_required_file(dir, &entry);
            ui.detail(&format!("{} : {}", entry, resolved.display()));
        }
    }

    fn build(&self, ui: &mut dyn UserInterface, runner: &dyn CommandRunner) -> Result<String> {
        let builder = ImageBuilder::from_config(&self.config, runner)?;
        let mut spinner = ui.start_spinner("Building Docker image");

        match builder.build_image() {
            Ok(image) => {
                spinner.finish_success(&format!("Docker image built successfully: {}", image));
                Ok(image)
            }
            Err(e) => {
                spinner.finish_error("Docker image build failed");
                Err(e)
            }
        }
    }

    fn create(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn CommandRunner,
        image: &str,
    ) -> Result<()> {
        let manager = ContainerManager::from_config(&self.config, runner)?;
        let mut spinner = ui.start_spinner(&format!("Creating container from {}", image));

        match manager.create_container(image) {
            Ok(id) => {
                spinner.finish_success(&format!("Docker container created successfully: {}", id));
                Ok(())
            }
            Err(e) => {
                spinner.finish_error("Docker container creation failed");
                Err(e)
            }
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let runner = SystemRunner;
        let lookup = SearchPath::from_env();
        let daemon = DockerDaemon::new(&self.config, &runner);
        self.execute_with(ui, &runner, &lookup, &daemon)
    }
}
