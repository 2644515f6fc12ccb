use anyhow::Context;
use tracing_subscriber::EnvFilter;

use msh::{start_repl, Config};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::debug!(?config, "starting msh");
    let code = start_repl(config).context("msh terminated")?;
    std::process::exit(code)
}
