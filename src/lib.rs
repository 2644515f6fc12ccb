//! msh: a small interactive shell.
//!
//! Reads a line, optionally replaces a `!n` line with an entry from a
//! fixed-size history, splits it into at most eleven tokens and either runs
//! one of the builtins (`cd`, `history`, `exit`/`quit`) or forks and execs
//! the program, waiting for it before the next prompt.

pub mod builtins;
pub mod completion;
pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod parser;
pub mod reader;
pub mod recall;
pub mod repl;
pub mod util;

pub use config::Config;
pub use error::ShellError;
pub use repl::{start_repl, Shell};
