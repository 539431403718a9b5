//! Thin façades over the `docker` CLI.
//!
//! - [`daemon`] - daemon state and startup
//! - [`image`] - `docker build`
//! - [`container`] - `docker create`
//! - [`suite`] - the configured test command
//!
//! Every façade runs commands through a [`CommandRunner`](crate::shell::CommandRunner)
//! so tests can record invocations instead of spawning processes.

pub mod container;
pub mod daemon;
pub mod image;
pub mod suite;

pub use container::ContainerManager;
pub use daemon::{default_start_command, DaemonControl, DockerDaemon, MockDaemon};
pub use image::ImageBuilder;
pub use suite::TestSuite;
