//! Named access to configuration values.

use crate::config::loader::json_type_name;
use crate::error::{DockprepError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Well-known configuration keys.
pub mod keys {
    pub const OS_DEPENDENCIES: &str = "os_dependencies";
    pub const CONFIG_FILES_DIR: &str = "config_files_dir";
    pub const REQUIRED_CONFIG_FILES: &str = "required_config_files";
    pub const VERBOSE: &str = "verbose";
    pub const LOGGING: &str = "logging";
    pub const DOCKER_BINARY: &str = "docker_binary";
    pub const DOCKER_START_COMMAND: &str = "docker_start_command";
}

/// Immutable key/value view over the JSON configuration document.
///
/// Values are looked up by name; typed getters fail with
/// `ConfigKeyMissing` or `ConfigKeyType` instead of guessing.
#[derive(Debug, Clone, Default)]
pub struct DockerConfig {
    values: Map<String, Value>,
}

impl DockerConfig {
    /// Wrap an already-parsed JSON object.
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Merge the CLI-derived `verbose` and `logging` flags.
    ///
    /// The flags always replace whatever the document says.
    pub fn with_overrides(mut self, verbose: bool, logging: bool) -> Self {
        self.values
            .insert(keys::VERBOSE.to_string(), Value::Bool(verbose));
        self.values
            .insert(keys::LOGGING.to_string(), Value::Bool(logging));
        self
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Look up a raw value.
    pub fn get_value(&self, key: &str) -> Result<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| DockprepError::ConfigKeyMissing {
                key: key.to_string(),
            })
    }

    /// Look up a string value.
    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.get_value(key)?
            .as_str()
            .ok_or_else(|| type_error(key, "a string"))
    }

    /// Look up a string value that may be absent.
    pub fn get_optional_str(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(type_error(key, "a string")),
        }
    }

    /// Look up a sequence of strings, preserving order.
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>> {
        let value = self.get_value(key)?;
        parse_string_list(key, value)
    }

    /// Look up a sequence of strings that may be absent.
    pub fn get_optional_string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_string_list(key, value).map(Some),
        }
    }

    /// Look up a boolean, treating an absent key as `false`.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(type_error(key, "a boolean")),
        }
    }

    /// Deserialize a typed view of the whole document.
    ///
    /// Unknown keys are ignored by the target type.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.values.clone())).map_err(|e| {
            DockprepError::ConfigValidationError {
                message: e.to_string(),
            }
        })
    }

    /// Whether `--verbose` was given.
    pub fn verbose(&self) -> bool {
        self.get_bool(keys::VERBOSE).unwrap_or(false)
    }

    /// Whether `--logging` was given.
    pub fn logging(&self) -> bool {
        self.get_bool(keys::LOGGING).unwrap_or(false)
    }

    /// The container runtime executable, `docker` unless overridden.
    pub fn docker_binary(&self) -> Result<String> {
        Ok(self
            .get_optional_str(keys::DOCKER_BINARY)?
            .unwrap_or("docker")
            .to_string())
    }
}

fn parse_string_list(key: &str, value: &Value) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(DockprepError::ConfigKeyType {
            key: key.to_string(),
            expected: format!("an array of strings, found {}", json_type_name(value)),
        });
    };

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| type_error(key, "an array of strings"))
        })
        .collect()
}

fn type_error(key: &str, expected: &str) -> DockprepError {
    DockprepError::ConfigKeyType {
        key: key.to_string(),
        expected: expected.to_string(),
    }
}
