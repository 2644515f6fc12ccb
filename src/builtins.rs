// builtins.rs

use std::env;
use std::io::Write;

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ShellError};
use crate::history::HistoryRing;
use crate::parser::TokenVector;
use crate::util::write_lines;

pub const BUILTIN_NAMES: [&str; 4] = ["cd", "exit", "history", "quit"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd(Option<String>),
    History { show_pid: bool },
}

/// What the loop does after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

impl Builtin {
    pub fn from_tokens(tokens: &TokenVector) -> Option<Self> {
        match tokens.command()? {
            "quit" | "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::Cd(tokens.get(1).map(str::to_string))),
            "history" => Some(Builtin::History {
                show_pid: tokens.get(1) == Some("-p"),
            }),
            _ => None,
        }
    }
}

pub fn run_builtin<W: Write>(
    builtin: Builtin,
    history: &HistoryRing,
    config: &Config,
    out: &mut W,
) -> Result<Flow> {
    match builtin {
        Builtin::Exit => Ok(Flow::Exit(0)),
        Builtin::Cd(None) => Ok(Flow::Continue),
        Builtin::Cd(Some(target)) => {
            if let Err(source) = env::set_current_dir(&target) {
                debug!(target = %target, error = %source, "cd failed");
                if config.strict_cd {
                    return Err(ShellError::DirectoryChangeFailed {
                        path: target,
                        source,
                    });
                }
            }
            Ok(Flow::Continue)
        }
        Builtin::History { show_pid } => {
            write_lines(out, history.render(show_pid))?;
            Ok(Flow::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(line: &str) -> Option<Builtin> {
        Builtin::from_tokens(&TokenVector::parse(line))
    }

    #[test]
    fn recognizes_builtins() {
        assert_eq!(builtin("quit"), Some(Builtin::Exit));
        assert_eq!(builtin("exit 3"), Some(Builtin::Exit));
        assert_eq!(builtin("cd"), Some(Builtin::Cd(None)));
        assert_eq!(builtin("cd /tmp x"), Some(Builtin::Cd(Some("/tmp".into()))));
        assert_eq!(builtin("history"), Some(Builtin::History { show_pid: false }));
        assert_eq!(builtin("history -p"), Some(Builtin::History { show_pid: true }));
        assert_eq!(builtin("history -x"), Some(Builtin::History { show_pid: false }));
    }

    #[test]
    fn everything_else_is_external() {
        assert_eq!(builtin("ls -l"), None);
        assert_eq!(builtin("Exit"), None);
        assert_eq!(builtin("   "), None);
    }

    #[test]
    fn exit_requests_status_zero() {
        let mut out = Vec::new();
        let flow = run_builtin(Builtin::Exit, &HistoryRing::new(), &Config::default(), &mut out);
        assert_eq!(flow.unwrap(), Flow::Exit(0));
        assert!(out.is_empty());
    }

    #[test]
    fn cd_failure_is_silent_by_default() {
        let mut out = Vec::new();
        let flow = run_builtin(
            Builtin::Cd(Some("/definitely/not/a/dir".into())),
            &HistoryRing::new(),
            &Config::default(),
            &mut out,
        );
        assert_eq!(flow.unwrap(), Flow::Continue);
        assert!(out.is_empty());
    }

    #[test]
    fn cd_failure_surfaces_in_strict_mode() {
        let config = Config { strict_cd: true };
        let err = run_builtin(
            Builtin::Cd(Some("/definitely/not/a/dir".into())),
            &HistoryRing::new(),
            &config,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::DirectoryChangeFailed { .. }));
        assert!(err.to_string().starts_with("cd: /definitely/not/a/dir: "));
    }

    #[test]
    fn history_writes_rendered_lines() {
        let mut ring = HistoryRing::new();
        ring.record("ls");
        ring.record("history");
        let mut out = Vec::new();
        run_builtin(
            Builtin::History { show_pid: false },
            &ring,
            &Config::default(),
            &mut out,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0: ls \n1: history \n");
    }
}
