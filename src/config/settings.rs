//! Typed settings for the build, create and test stages.
//!
//! Each stage deserializes only the keys it cares about from the
//! configuration document, so a config that never builds an image does not
//! need `image_name`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Settings for `docker build`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageSettings {
    /// Repository name for the built image.
    pub image_name: String,

    /// Tag for the built image.
    #[serde(default = "default_image_tag")]
    pub image_tag: String,

    /// Dockerfile path, relative to the working directory.
    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,

    /// Build context directory.
    #[serde(default = "default_build_context")]
    pub build_context: String,

    /// `--build-arg` pairs, passed in key order.
    #[serde(default)]
    pub build_args: BTreeMap<String, String>,
}

impl ImageSettings {
    /// The `name:tag` reference the build produces.
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image_name, self.image_tag)
    }
}

fn default_image_tag() -> String {
    "latest".to_string()
}

fn default_dockerfile() -> String {
    "Dockerfile".to_string()
}

fn default_build_context() -> String {
    ".".to_string()
}

/// Settings for `docker create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContainerSettings {
    /// Name for the created container.
    #[serde(default)]
    pub container_name: Option<String>,

    /// Extra arguments inserted before the image reference.
    #[serde(default)]
    pub container_options: Vec<String>,
}

/// Settings for the test stage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestSettings {
    /// Program and arguments of the test command.
    pub test_command: Vec<String>,
}
