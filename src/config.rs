// config.rs

/// Size of the line buffer; one byte is reserved, so a line keeps at most
/// `MAX_COMMAND_SIZE - 1` bytes.
pub const MAX_COMMAND_SIZE: usize = 255;

/// Command name plus ten arguments.
pub const MAX_NUM_ARGUMENTS: usize = 11;

pub const HISTORY_CAPACITY: usize = 15;

pub const PROMPT: &str = "msh> ";

pub const STRICT_CD_VAR: &str = "MSH_STRICT_CD";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Report `cd` failures instead of ignoring them.
    pub strict_cd: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let strict_cd = std::env::var(STRICT_CD_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self { strict_cd }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
