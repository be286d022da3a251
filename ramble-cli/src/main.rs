//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::io::Write;

use ramble_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match ramble_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            writeln!(std::io::stderr(), "ramble: {err}").ok();
            std::process::exit(1);
        }
    }
}
