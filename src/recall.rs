// recall.rs
//
// `!n` history substitution. Only `!d` and `!dd` are recall requests;
// anything longer is an ordinary command line.

use tracing::debug;

use crate::history::HistoryRing;
use crate::error::{Result, ShellError};

/// Returns the index requested by a `!n` line, or `None` if the line is not
/// a recall.
pub fn parse_recall(line: &str) -> Option<usize> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let bytes = line.as_bytes();
    if bytes.len() > 3 || bytes.first() != Some(&b'!') {
        return None;
    }
    let digits = &bytes[1..];
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(digits.iter().fold(0, |n, d| n * 10 + usize::from(d - b'0')))
}

/// Replaces a `!n` line with the stored text of entry `n`, verbatim. Other
/// lines come back unchanged.
pub fn resolve(line: &str, history: &HistoryRing) -> Result<String> {
    let Some(index) = parse_recall(line) else {
        return Ok(line.to_string());
    };
    if index >= history.capacity() || index >= history.len() {
        debug!(index, count = history.len(), "recall out of range");
        return Err(ShellError::CommandNotInHistory);
    }
    let text = history.lookup(index)?;
    debug!(index, text, "recalled history entry");
    Ok(text.to_string())
}
