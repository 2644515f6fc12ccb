// repl.rs

use std::io::{IsTerminal, Write};

use tracing::{debug, info};

use crate::builtins::{run_builtin, Builtin, Flow};
use crate::config::{Config, PROMPT};
use crate::error::Result;
use crate::executor::execute;
use crate::history::HistoryRing;
use crate::parser::TokenVector;
use crate::reader::{CommandLine, InteractiveReader, LineSource, StdinReader};
use crate::recall::resolve;

/// Shell state that lives across loop iterations. The working directory is
/// the process's own.
pub struct Shell {
    history: HistoryRing,
    config: Config,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Self {
            history: HistoryRing::new(),
            config,
        }
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// Runs one command line. A failed `!n` recall leaves the history untouched;
    /// any other non-empty line is recorded verbatim before it runs.
    pub fn eval<W: Write>(&mut self, line: &CommandLine, out: &mut W) -> Result<Flow> {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let text = resolve(line.as_str(), &self.history)?;
        self.history.record(line.as_str());

        let tokens = TokenVector::parse(&text);
        if let Some(builtin) = Builtin::from_tokens(&tokens) {
            debug!(?builtin, "running builtin");
            return run_builtin(builtin, &self.history, &self.config, out);
        }
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }
        let child = execute(&tokens, out)?;
        self.history.patch_last_pid(child);
        Ok(Flow::Continue)
    }

    /// Reads and runs lines until `exit`/`quit` (returning its status) or a
    /// fatal error. Per-line errors are printed and the loop goes on.
    pub fn run<S: LineSource, W: Write>(&mut self, source: &mut S, out: &mut W) -> Result<i32> {
        loop {
            let line = source.read_line(PROMPT)?;
            match self.eval(&line, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit(code)) => return Ok(code),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    writeln!(out, "{}", err)?;
                    out.flush()?;
                }
            }
        }
    }
}

/// Runs the shell on the process's stdin/stdout, with line editing when
/// stdin is a terminal.
pub fn start_repl(config: Config) -> Result<i32> {
    let mut shell = Shell::new(config);
    let mut out = std::io::stdout();
    if std::io::stdin().is_terminal() {
        info!("interactive session");
        let mut reader = InteractiveReader::new()?;
        shell.run(&mut reader, &mut out)
    } else {
        info!("reading commands from non-terminal stdin");
        let mut reader = StdinReader::new(std::io::stdin().lock(), std::io::stdout());
        shell.run(&mut reader, &mut out)
    }
}
