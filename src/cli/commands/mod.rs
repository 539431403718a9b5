//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait. A command either completes
//! or returns the error that stopped it; `main` turns that into an exit code.

pub mod run;

pub use run::RunCommand;

use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<()>;
}
