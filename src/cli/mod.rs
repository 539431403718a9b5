//! Command-line interface for dockprep.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Stages};
pub use commands::{Command, RunCommand};
