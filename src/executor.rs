// executor.rs

use std::ffi::CString;
use std::io::Write;

use nix::sys::wait::waitpid;
use nix::unistd::{execvp, fork, ForkResult, Pid};
use tracing::{debug, warn};

use crate::error::{Result, ShellError};
use crate::parser::TokenVector;

/// Exit status of a child whose exec failed.
pub const EXEC_FAILED_STATUS: i32 = 127;

fn to_argv(tokens: &TokenVector) -> Result<Vec<CString>> {
    tokens
        .as_slice()
        .iter()
        .map(|t| CString::new(t.as_str()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| {
            let name = tokens.command().unwrap_or_default();
            ShellError::ExecutableNotFound(name.to_string())
        })
}

/// Forks, execs `tokens[0]` from `PATH` with the whole vector as argv, and
/// waits for that child. Returns the child's pid.
pub fn execute<W: Write>(tokens: &TokenVector, out: &mut W) -> Result<Pid> {
    let argv = to_argv(tokens)?;
    let Some(program) = argv.first() else {
        return Err(ShellError::ExecutableNotFound(String::new()));
    };
    out.flush()?;
    std::io::stdout().flush()?;

    match unsafe { fork() }? {
        ForkResult::Child => {
            let _ = execvp(program, &argv);
            let mut stdout = std::io::stdout();
            let name = program.to_string_lossy().into_owned();
            let _ = writeln!(stdout, "{}", ShellError::ExecutableNotFound(name));
            let _ = stdout.flush();
            unsafe { libc::_exit(EXEC_FAILED_STATUS) }
        }
        ForkResult::Parent { child } => {
            debug!(%child, command = ?program, "spawned child");
            match waitpid(child, None) {
                Ok(status) => debug!(?status, "child finished"),
                Err(err) => warn!(%child, %err, "waitpid failed"),
            }
            Ok(child)
        }
    }
}
