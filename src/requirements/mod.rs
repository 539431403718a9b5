//! Host prerequisite detection.
//!
//! This module checks that the executables, configuration files and
//! container daemon a Docker build relies on are in place.
//!
//! # Modules
//!
//! - [`checker`] - Dependency, required-file and daemon checks
//! - [`probe`] - Executable resolution on the search path

pub mod checker;
pub mod probe;

pub use checker::{resolve_required_file, DependencyChecker};
pub use probe::{ExecutableLookup, SearchPath, StaticLookup};
