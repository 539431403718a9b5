//! External process execution.

pub mod command;
pub mod mock;

pub use command::{
    execute, execute_check, format_command, CommandOptions, CommandResult, CommandRunner,
    SystemRunner,
};
pub use mock::{MockRunner, RecordedCommand};
