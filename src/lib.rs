//! dockprep - Docker environment preparation.
//!
//! dockprep checks that a host is ready to work with a Docker-based project
//! (required executables on `PATH`, required configuration files on disk, a
//! running Docker daemon), then optionally builds an image, creates a
//! container from it and runs a test command.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - JSON configuration loading and typed access
//! - [`docker`] - Daemon control, image builds, containers and tests
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Executable lookup and prerequisite checks
//! - [`shell`] - External command execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use dockprep::config::DockerConfig;
//! use dockprep::docker::MockDaemon;
//! use dockprep::requirements::{DependencyChecker, StaticLookup};
//! use serde_json::json;
//!
//! let values = json!({
//!     "os_dependencies": ["docker"],
//!     "config_files_dir": ".",
//!     "required_config_files": [],
//! });
//! let config = DockerConfig::new(values.as_object().cloned().unwrap());
//! let lookup = StaticLookup::new(["docker"]);
//! let daemon = MockDaemon::stopped();
//!
//! DependencyChecker::new(&config, &lookup, &daemon)
//!     .prepare_environment()
//!     .unwrap();
//! assert_eq!(daemon.start_calls(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod docker;
pub mod error;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{DockprepError, Result};
