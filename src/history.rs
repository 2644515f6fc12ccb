// history.rs

use std::collections::VecDeque;

use nix::unistd::{getpid, Pid};
use tracing::{debug, trace};

use crate::config::HISTORY_CAPACITY;
use crate::error::{Result, ShellError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub text: String,
    pub pid: Pid,
}

/// Last submitted command lines, oldest first. When full, recording a line
/// evicts the oldest entry.
///
/// Each entry starts out with the shell's own pid. After a child is forked
/// the newest entry's pid is overwritten with the child's, so for built-ins
/// (which never fork) the shell pid stays.
pub struct HistoryRing {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryRing {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Stores `line` (minus its trailing newline) and returns its index.
    pub fn record(&mut self, line: &str) -> usize {
        let text = line.split('\n').next().unwrap_or_default().to_string();
        if self.entries.len() == self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                trace!(text = %evicted.text, "evicted oldest history entry");
            }
        }
        self.entries.push_back(HistoryEntry {
            text,
            pid: getpid(),
        });
        let index = self.entries.len() - 1;
        debug!(index, "recorded history entry");
        index
    }

    pub fn patch_last_pid(&mut self, pid: Pid) {
        if let Some(last) = self.entries.back_mut() {
            debug!(old = %last.pid, new = %pid, "patched pid of newest entry");
            last.pid = pid;
        }
    }

    pub fn lookup(&self, index: usize) -> Result<&str> {
        self.entries
            .get(index)
            .map(|e| e.text.as_str())
            .ok_or(ShellError::CommandNotInHistory)
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn render(&self, show_pid: bool) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                if show_pid {
                    format!("{}: {} {} ", i, e.text, e.pid)
                } else {
                    format!("{}: {} ", i, e.text)
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}
