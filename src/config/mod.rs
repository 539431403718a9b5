//! Configuration loading and access for dockprep.
//!
//! - File loading and JSON parsing in [`loader`]
//! - Named value access in [`values`]
//! - Typed per-stage settings in [`settings`]
//!
//! # Example
//!
//! ```
//! use dockprep::config::{keys, parse_config, DockerConfig};
//! use std::path::Path;
//!
//! let map = parse_config(
//!     r#"{"os_dependencies": ["docker"], "config_files_dir": "/cfg"}"#,
//!     Path::new("config.json"),
//! )
//! .unwrap();
//! let config = DockerConfig::new(map).with_overrides(true, false);
//!
//! assert_eq!(config.get_string_list(keys::OS_DEPENDENCIES).unwrap(), vec!["docker"]);
//! assert_eq!(config.get_str(keys::CONFIG_FILES_DIR).unwrap(), "/cfg");
//! assert!(config.verbose());
//! ```

pub mod loader;
pub mod settings;
pub mod values;

pub use loader::{load_config, load_config_file, parse_config};
pub use settings::{ContainerSettings, ImageSettings, TestSettings};
pub use values::{keys, DockerConfig};
