//! Error types for dockprep operations.
//!
//! This module defines [`DockprepError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Library code returns `DockprepError` and never exits the process
//! - Only `main` turns an error into an exit code
//! - Use `anyhow::Error` (via `DockprepError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dockprep operations.
#[derive(Debug, Error)]
pub enum DockprepError {
    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file could not be read or is not a JSON object.
    #[error("Failed to read config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A configuration key the caller needs is absent.
    #[error("Missing configuration key '{key}'")]
    ConfigKeyMissing { key: String },

    /// Configuration values do not fit the shape a stage needs.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A configuration key holds a value of the wrong type.
    #[error("Configuration key '{key}' must be {expected}")]
    ConfigKeyType { key: String, expected: String },

    /// One or more executables could not be found on the search path.
    #[error("Missing dependencies: {}", .names.join(", "))]
    MissingDependencies { names: Vec<String> },

    /// One or more required files are absent (or are not regular files).
    #[error("Missing required files: {}", .files.join(", "))]
    MissingRequiredFiles { files: Vec<String> },

    /// The container daemon could not be started.
    #[error("Failed to start Docker daemon: {message}")]
    DaemonStart { message: String },

    /// A runtime command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}{}", format_detail(.detail))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        detail: Option<String>,
    },

    /// Container creation was requested without an image from this run.
    #[error("Docker image needs to be built before creating a container.")]
    ImageNotBuilt,

    /// The test command exited unsuccessfully.
    #[error("Test suite failed with exit code {code:?}")]
    TestsFailed { code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(" ({})", d),
        _ => String::new(),
    }
}

/// Result type alias for dockprep operations.
pub type Result<T> = std::result::Result<T, DockprepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = DockprepError::ConfigNotFound {
            path: PathBuf::from("/foo/bar.json"),
        };
        assert!(err.to_string().contains("/foo/bar.json"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = DockprepError::ConfigParseError {
            path: PathBuf::from("/config.json"),
            message: "expected value at line 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.json"));
        assert!(msg.contains("expected value at line 1"));
    }

    #[test]
    fn config_key_errors_name_the_key() {
        let missing = DockprepError::ConfigKeyMissing {
            key: "os_dependencies".into(),
        };
        assert!(missing.to_string().contains("os_dependencies"));

        let wrong = DockprepError::ConfigKeyType {
            key: "config_files_dir".into(),
            expected: "a string".into(),
        };
        assert_eq!(
            wrong.to_string(),
            "Configuration key 'config_files_dir' must be a string"
        );
    }

    #[test]
    fn missing_dependencies_joins_names_in_order() {
        let err = DockprepError::MissingDependencies {
            names: vec!["docker".into(), "git".into()],
        };
        assert_eq!(err.to_string(), "Missing dependencies: docker, git");
    }

    #[test]
    fn missing_required_files_joins_entries_in_order() {
        let err = DockprepError::MissingRequiredFiles {
            files: vec!["b.json".into(), "a.json".into()],
        };
        assert_eq!(err.to_string(), "Missing required files: b.json, a.json");
    }

    #[test]
    fn command_failed_displays_command_code_and_detail() {
        let err = DockprepError::CommandFailed {
            command: "docker build .".into(),
            code: Some(1),
            detail: Some("no such file".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("docker build ."));
        assert!(msg.contains("1"));
        assert!(msg.contains("(no such file)"));
    }

    #[test]
    fn command_failed_omits_empty_detail() {
        let err = DockprepError::CommandFailed {
            command: "docker create img".into(),
            code: None,
            detail: Some(String::new()),
        };
        assert!(!err.to_string().contains("()"));
    }

    #[test]
    fn image_not_built_message() {
        assert!(DockprepError::ImageNotBuilt
            .to_string()
            .contains("needs to be built"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DockprepError = io_err.into();
        assert!(matches!(err, DockprepError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(DockprepError::ImageNotBuilt)
        }
        assert!(returns_error().is_err());
    }
}
