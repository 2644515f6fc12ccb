// parser.rs

use tracing::debug;

use crate::config::MAX_NUM_ARGUMENTS;

const WHITESPACE: [char; 3] = [' ', '\t', '\n'];

/// Argv-style tokens of one command line, at most `MAX_NUM_ARGUMENTS` long.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenVector {
    tokens: Vec<String>,
}

impl TokenVector {
    /// Splits on runs of spaces, tabs and newlines. Tokens past the limit are dropped.
    pub fn parse(line: &str) -> Self {
        let mut tokens = Vec::with_capacity(MAX_NUM_ARGUMENTS);
        let mut words = line.split(WHITESPACE).filter(|w| !w.is_empty());
        for word in words.by_ref().take(MAX_NUM_ARGUMENTS) {
            tokens.push(word.to_string());
        }
        let dropped = words.count();
        if dropped > 0 {
            debug!(dropped, "too many arguments, extra tokens ignored");
        }
        Self { tokens }
    }

    pub fn command(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
