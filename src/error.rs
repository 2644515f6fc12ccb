// error.rs

use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Command not in history.")]
    CommandNotInHistory,
    #[error("{0}: Command not found.")]
    ExecutableNotFound(String),
    #[error("cd: {path}: {source}")]
    DirectoryChangeFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("fork failed: {0}")]
    Spawn(#[from] nix::Error),
    #[error("end of input")]
    EndOfInput,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

impl ShellError {
    /// Fatal errors end the shell; everything else only aborts the current line.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellError::EndOfInput | ShellError::Io(_) | ShellError::Readline(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
