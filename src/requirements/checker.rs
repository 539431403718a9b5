//! Host prerequisite checking.
//!
//! The `DependencyChecker` verifies that everything a Docker build needs is in
//! place before any build or create stage runs:
//!
//! 1. every executable in `os_dependencies` resolves on the search path
//! 2. every entry of `required_config_files` is a regular file
//! 3. the Docker daemon is running (started once if it is not)
//!
//! Each check collects every failure before reporting, so one run surfaces
//! all missing prerequisites rather than the first.

use crate::config::{keys, DockerConfig};
use crate::docker::DaemonControl;
use crate::error::{DockprepError, Result};
use crate::requirements::probe::ExecutableLookup;
use std::path::{Path, PathBuf};

/// Verifies the host environment against a configuration.
///
/// Holds no state between calls; every `prepare_environment` re-checks
/// everything from scratch.
pub struct DependencyChecker<'a> {
    config: &'a DockerConfig,
    lookup: &'a dyn ExecutableLookup,
    daemon: &'a dyn DaemonControl,
}

impl<'a> DependencyChecker<'a> {
    /// Create a new checker.
    pub fn new(
        config: &'a DockerConfig,
        lookup: &'a dyn ExecutableLookup,
        daemon: &'a dyn DaemonControl,
    ) -> Self {
        Self {
            config,
            lookup,
            daemon,
        }
    }

    /// Check dependencies, then required files, then daemon state.
    ///
    /// Stops at the first failing step. The daemon is started at most once,
    /// and only after both checks have passed.
    pub fn prepare_environment(&self) -> Result<()> {
        self.check_dependencies()?;
        self.check_required_files()?;
        self.ensure_daemon()
    }

    /// Start the daemon unless it already answers.
    pub fn ensure_daemon(&self) -> Result<()> {
        if self.daemon.is_running() {
            tracing::debug!("Docker daemon already running");
            return Ok(());
        }
        tracing::info!("Docker daemon not running, starting it");
        self.daemon.start()
    }

    /// Verify every configured executable resolves on the search path.
    ///
    /// # Errors
    ///
    /// `MissingDependencies` listing every unresolved name in input order.
    pub fn check_dependencies(&self) -> Result<()> {
        let dependencies = self.config.get_string_list(keys::OS_DEPENDENCIES)?;
        let mut missing = Vec::new();

        for dep in dependencies {
            match self.lookup.resolve(&dep) {
                Some(path) => tracing::debug!("{} resolved to {}", dep, path.display()),
                None => missing.push(dep),
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DockprepError::MissingDependencies { names: missing })
        }
    }

    /// Verify every required config file exists as a regular file.
    ///
    /// # Errors
    ///
    /// `MissingRequiredFiles` listing the original (unresolved) entries in
    /// input order.
    pub fn check_required_files(&self) -> Result<()> {
        let config_dir = self.config.get_str(keys::CONFIG_FILES_DIR)?;
        let required = self.config.get_string_list(keys::REQUIRED_CONFIG_FILES)?;
        let mut missing = Vec::new();

        for entry in required {
            let resolved = resolve_required_file(config_dir, &entry);
            tracing::debug!("{} : {}", entry, resolved.display());
            if !resolved.is_file() {
                missing.push(entry);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DockprepError::MissingRequiredFiles { files: missing })
        }
    }
}

/// Resolve a required-file entry against the config directory.
///
/// An entry whose text already starts with `config_dir` is used unchanged;
/// anything else is joined onto it. The comparison is a literal string
/// prefix: `/cfg/` and `/cfg` are different prefixes and nothing is
/// canonicalised.
pub fn resolve_required_file(config_dir: &str, entry: &str) -> PathBuf {
    if entry.starts_with(config_dir) {
        PathBuf::from(entry)
    } else {
        Path::new(config_dir).join(entry)
    }
}
