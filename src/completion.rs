// completion.rs

use std::os::unix::fs::PermissionsExt;

use itertools::Itertools;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use crate::builtins::BUILTIN_NAMES;

/// Completes the command word from builtins and `PATH`, arguments as file names.
pub struct CommandCompleter {
    files: FilenameCompleter,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            files: FilenameCompleter::new(),
        }
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builtin names and `PATH` executables starting with `prefix`, sorted and unique.
pub fn command_candidates(prefix: &str, path_var: Option<&str>) -> Vec<String> {
    let builtins = BUILTIN_NAMES
        .iter()
        .filter(|b| b.starts_with(prefix))
        .map(|b| b.to_string());
    let executables = path_var
        .into_iter()
        .flat_map(|p| p.split(':'))
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flat_map(|entries| entries.flatten())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if !name.starts_with(prefix) {
                return None;
            }
            let meta = std::fs::metadata(entry.path()).ok()?;
            (meta.is_file() && meta.permissions().mode() & 0o111 != 0).then_some(name)
        });
    builtins.chain(executables).sorted().dedup().collect()
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let head = &line[..pos];
        let start = head.len() - head.trim_start().len();
        if head[start..].contains(char::is_whitespace) {
            return self.files.complete(line, pos, ctx);
        }
        let path_var = std::env::var("PATH").ok();
        let pairs = command_candidates(&head[start..], path_var.as_deref())
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: format!("{} ", name),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for CommandCompleter {}
