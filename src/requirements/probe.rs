//! Executable resolution on the search path.
//!
//! Lookup walks `PATH` directly instead of shelling out to `which`, whose
//! behaviour varies across systems and is sometimes a shell builtin.
//!
//! # Example
//!
//! ```no_run
//! use dockprep::requirements::probe::{ExecutableLookup, SearchPath};
//!
//! let lookup = SearchPath::from_env();
//! if let Some(path) = lookup.resolve("docker") {
//!     println!("docker found at {}", path.display());
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Resolves executable names to paths.
pub trait ExecutableLookup {
    /// Return the path an executable named `name` resolves to, if any.
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

/// Lookup over an explicit list of directories, in order.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
}

impl SearchPath {
    /// Use the directories of the current process's `PATH`.
    ///
    /// `PATH` is read at call time, so changes made by this process are seen.
    pub fn from_env() -> Self {
        Self {
            entries: parse_system_path(),
        }
    }

    /// Use the given directories.
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// The directories searched, in order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

impl ExecutableLookup for SearchPath {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        resolve_executable(name, &self.entries)
    }
}

/// Fixed set of names that always resolve, for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    present: HashSet<String>,
}

impl StaticLookup {
    /// Resolve exactly the given names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExecutableLookup for StaticLookup {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.present
            .contains(name)
            .then(|| PathBuf::from("/usr/bin").join(name))
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve an executable the way `which` does.
///
/// A name containing a path separator is checked as-is and never searched.
/// Otherwise each directory is tried in order and the first regular,
/// executable file wins. On Windows each `PATHEXT` extension is also tried.
pub fn resolve_executable(name: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if has_separator(name) {
        let candidate = PathBuf::from(name);
        return accept(&candidate).then_some(candidate);
    }

    for dir in path_entries {
        for candidate in candidates(dir, name) {
            if accept(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

fn accept(candidate: &Path) -> bool {
    candidate.is_file() && is_executable(candidate)
}

fn has_separator(name: &str) -> bool {
    name.contains('/') || (cfg!(windows) && name.contains('\\'))
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut out = vec![dir.join(name)];
    let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    for ext in pathext.split(';').filter(|e| !e.is_empty()) {
        out.push(dir.join(format!("{}{}", name, ext)));
    }
    out
}
