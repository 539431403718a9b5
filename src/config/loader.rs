//! Configuration file loading.
//!
//! The configuration is a single JSON object named on the command line.
//! There is no discovery or merging: CLI overrides are applied afterwards
//! by [`DockerConfig::with_overrides`](super::DockerConfig::with_overrides).

use crate::config::values::DockerConfig;
use crate::error::{DockprepError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Load a config file and parse it into a JSON object.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the JSON is invalid or is not an object.
pub fn load_config_file(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DockprepError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DockprepError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
    })?;

    parse_config(&content, path)
}

/// Parse JSON content into a configuration object.
///
/// # Arguments
///
/// * `content` - The JSON content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| DockprepError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(DockprepError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: format!("expected a JSON object, found {}", json_type_name(&other)),
        }),
    }
}

/// Load a config file and apply the CLI overrides.
pub fn load_config(path: &Path, verbose: bool, logging: bool) -> Result<DockerConfig> {
    let map = load_config_file(path)?;
    tracing::debug!("Loaded {} config keys from {}", map.len(), path.display());
    Ok(DockerConfig::new(map).with_overrides(verbose, logging))
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_file_reads_object() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"os_dependencies": ["docker"]}"#).unwrap();

        let map = load_config_file(&path).unwrap();
        assert_eq!(map["os_dependencies"][0], "docker");
    }

    #[test]
    fn load_config_file_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(&temp.path().join("nope.json"));
        assert!(matches!(result, Err(DockprepError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_config_file_directory_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(temp.path());
        assert!(matches!(
            result,
            Err(DockprepError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn parse_config_rejects_invalid_json() {
        let result = parse_config("{not json", Path::new("bad.json"));
        match result {
            Err(DockprepError::ConfigParseError { path, .. }) => {
                assert_eq!(path, Path::new("bad.json"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn parse_config_rejects_non_object() {
        let err = parse_config("[1, 2]", Path::new("list.json")).unwrap_err();
        assert!(err.to_string().contains("found an array"));
    }

    #[test]
    fn load_config_applies_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"verbose": false, "logging": true}"#).unwrap();

        let config = load_config(&path, true, false).unwrap();
        assert!(config.verbose());
        assert!(!config.logging());
    }
}
