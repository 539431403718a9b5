//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including docker and per-file resolution lines.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
}

impl OutputMode {
    /// Pick the mode for the `--verbose` flag.
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows command output.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    ///
    /// Spinners would interleave with streamed command output, so verbose
    /// mode prints plain lines instead.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
