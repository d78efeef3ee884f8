//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use env_logger::{Builder, Env, Target};
use triage_cli::CliError;

fn main() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    match triage_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("triage: {err}");
            std::process::exit(1);
        }
    }
}
