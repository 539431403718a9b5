//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

/// dockprep - Check host prerequisites, then build, create and test Docker environments.
#[derive(Debug, Clone, Parser)]
#[command(name = "dockprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "DOCKPREP_CONFIG")]
    pub config: PathBuf,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub logging: bool,

    /// Build the Docker image
    #[arg(long)]
    pub build_image: bool,

    /// Create a container from the image built in this run
    #[arg(long)]
    pub create_container: bool,

    /// Run the configured test command
    #[arg(long)]
    pub run_tests: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// The optional stages selected on the command line.
    pub fn stages(&self) -> Stages {
        Stages {
            build_image: self.build_image,
            create_container: self.create_container,
            run_tests: self.run_tests,
        }
    }
}

/// Which optional stages run after environment preparation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stages {
    /// Build the image.
    pub build_image: bool,
    /// Create a container from the built image.
    pub create_container: bool,
    /// Run the test command.
    pub run_tests: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_config_and_flags() {
        let cli = Cli::parse_from([
            "dockprep",
            "-c",
            "config.json",
            "-v",
            "-l",
            "--build-image",
            "--create-container",
            "--run-tests",
        ]);

        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert!(cli.verbose);
        assert!(cli.logging);
        assert_eq!(
            cli.stages(),
            Stages {
                build_image: true,
                create_container: true,
                run_tests: true,
            }
        );
    }

    #[test]
    fn stages_default_to_off() {
        let cli = Cli::parse_from(["dockprep", "--config", "config.json"]);
        assert_eq!(cli.stages(), Stages::default());
        assert!(!cli.verbose);
        assert!(!cli.logging);
        assert!(!cli.no_color);
    }

    #[test]
    fn config_is_required() {
        std::env::remove_var("DOCKPREP_CONFIG");
        assert!(Cli::try_parse_from(["dockprep", "--build-image"]).is_err());
    }
}
