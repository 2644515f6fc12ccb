// util.rs

use std::io::{ErrorKind, Write};

/// Writes each line followed by a newline. A reader that went away ends the
/// output quietly; the shell keeps running.
pub fn write_lines<W, I>(out: &mut W, lines: I) -> std::io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for line in lines {
        match writeln!(out, "{}", line.as_ref()) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(e),
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe {
        attempts: usize,
    }

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            self.attempts += 1;
            Err(ErrorKind::BrokenPipe.into())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_each_line() {
        let mut out = Vec::new();
        write_lines(&mut out, ["0: ls ", "1: pwd "]).unwrap();
        assert_eq!(out, b"0: ls \n1: pwd \n");
    }

    #[test]
    fn broken_pipe_stops_quietly() {
        let mut pipe = ClosedPipe { attempts: 0 };
        assert!(write_lines(&mut pipe, vec!["a".to_string(), "b".to_string()]).is_ok());
        assert_eq!(pipe.attempts, 1);
    }
}
