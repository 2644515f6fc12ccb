// reader.rs

use std::io::{BufRead, ErrorKind, Read, Write};

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use tracing::{debug, trace};

use crate::completion::CommandCompleter;
use crate::config::MAX_COMMAND_SIZE;
use crate::error::{Result, ShellError};

/// One line of user input, without its newline and at most
/// `MAX_COMMAND_SIZE - 1` bytes long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine(String);

impl CommandLine {
    pub fn new(raw: &str) -> Self {
        let line = raw.split('\n').next().unwrap_or_default();
        let mut end = line.len().min(MAX_COMMAND_SIZE - 1);
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        if end < line.len() {
            debug!(len = line.len(), kept = end, "command line truncated");
        }
        Self(line[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub trait LineSource {
    /// Shows `prompt` and blocks for the next line.
    fn read_line(&mut self, prompt: &str) -> Result<CommandLine>;
}

/// Plain buffered reader, used for piped input. Holds at most
/// `MAX_COMMAND_SIZE - 1` bytes of a line; the rest of the line is skipped.
/// Bytes that are not UTF-8 become U+FFFD.
pub struct StdinReader<R, W> {
    input: R,
    output: W,
    buf: Vec<u8>,
}

impl<R: BufRead, W: Write> StdinReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: Vec::with_capacity(MAX_COMMAND_SIZE),
        }
    }
}

impl<R: BufRead, W: Write> StdinReader<R, W> {
    /// Consumes input up to and including the next newline.
    fn skip_rest_of_line(&mut self) -> Result<usize> {
        let mut skipped = 0;
        loop {
            let available = match self.input.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if available.is_empty() {
                return Ok(skipped);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    self.input.consume(pos + 1);
                    return Ok(skipped + pos);
                }
                None => {
                    let len = available.len();
                    self.input.consume(len);
                    skipped += len;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> LineSource for StdinReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<CommandLine> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.buf.clear();
        let limit = MAX_COMMAND_SIZE - 1;
        loop {
            let room = (limit - self.buf.len()) as u64;
            match (&mut self.input).take(room).read_until(b'\n', &mut self.buf) {
                Ok(0) if self.buf.is_empty() => return Err(ShellError::EndOfInput),
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if self.buf.last() != Some(&b'\n') {
            let skipped = self.skip_rest_of_line()?;
            if skipped > 0 {
                debug!(skipped, "input line longer than the line buffer");
            }
        }
        let line = String::from_utf8_lossy(&self.buf);
        trace!(line = %line.trim_end(), "read line");
        Ok(CommandLine::new(&line))
    }
}

/// Line editor for terminals, with tab completion.
pub struct InteractiveReader {
    editor: Editor<CommandCompleter, DefaultHistory>,
}

impl InteractiveReader {
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CommandCompleter::new()));
        Ok(Self { editor })
    }
}

impl LineSource for InteractiveReader {
    fn read_line(&mut self, prompt: &str) -> Result<CommandLine> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                trace!(line = %line, "read line");
                Ok(CommandLine::new(&line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(ShellError::EndOfInput)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn command_line_cuts_at_newline() {
        assert_eq!(CommandLine::new("ls -l\n").as_str(), "ls -l");
        assert_eq!(CommandLine::new("a\nb").as_str(), "a");
        assert!(CommandLine::new("\n").is_empty());
        assert!(CommandLine::new("").is_empty());
    }

    #[test]
    fn whitespace_line_is_not_empty() {
        assert!(!CommandLine::new("  \n").is_empty());
    }

    #[test]
    fn long_lines_are_truncated() {
        let long = "x".repeat(400);
        assert_eq!(CommandLine::new(&long).as_str().len(), MAX_COMMAND_SIZE - 1);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "é".repeat(200);
        let line = CommandLine::new(&long);
        assert!(line.as_str().len() < MAX_COMMAND_SIZE);
        assert!(line.as_str().chars().all(|c| c == 'é'));
    }

    #[test]
    fn stdin_reader_prompts_and_reads() {
        let mut out = Vec::new();
        {
            let mut reader = StdinReader::new(Cursor::new("ls\n\npwd"), &mut out);
            assert_eq!(reader.read_line("msh> ").unwrap().as_str(), "ls");
            assert!(reader.read_line("msh> ").unwrap().is_empty());
            assert_eq!(reader.read_line("msh> ").unwrap().as_str(), "pwd");
            assert!(matches!(
                reader.read_line("msh> "),
                Err(ShellError::EndOfInput)
            ));
        }
        assert_eq!(String::from_utf8(out).unwrap(), "msh> ".repeat(4));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let input: &[u8] = b"echo \xff\xfe\nls\n";
        let mut reader = StdinReader::new(input, Vec::new());
        assert_eq!(reader.read_line("").unwrap().as_str(), "echo \u{fffd}\u{fffd}");
        assert_eq!(reader.read_line("").unwrap().as_str(), "ls");
    }

    #[test]
    fn overlong_line_is_cut_and_remainder_skipped() {
        let input = format!("{}\nls\n", "x".repeat(10_000));
        let mut reader = StdinReader::new(Cursor::new(input), Vec::new());
        let first = reader.read_line("").unwrap();
        assert_eq!(first.as_str(), "x".repeat(MAX_COMMAND_SIZE - 1));
        assert!(reader.buf.capacity() < 10_000);
        assert_eq!(reader.read_line("").unwrap().as_str(), "ls");
        assert!(matches!(reader.read_line(""), Err(ShellError::EndOfInput)));
    }

    #[test]
    fn line_of_exactly_buffer_size_keeps_next_line() {
        let input = format!("{}\npwd\n", "y".repeat(MAX_COMMAND_SIZE - 1));
        let mut reader = StdinReader::new(Cursor::new(input), Vec::new());
        assert_eq!(reader.read_line("").unwrap().as_str().len(), MAX_COMMAND_SIZE - 1);
        assert_eq!(reader.read_line("").unwrap().as_str(), "pwd");
    }
}
