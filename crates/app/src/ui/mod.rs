//! Terminal front-end
//!
//! Thin presentation over `SelectionHandle`: parse a line, send a command,
//! render the outcome.

pub mod command;
pub mod render;
pub mod repl;

pub use command::{Command, CommandError};
pub use repl::{Repl, ReplError};
