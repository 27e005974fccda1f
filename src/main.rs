//! BCN CLI - query the bconomy game API from the terminal
//!
//! Parses arguments, resolves configuration and runs one command. Command
//! output goes to stdout; logs and errors go to stderr.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bcncli::cli::Cli;
use bcncli::commands::{self, CommandError, Context};
use bcncli::config::{Config, ConfigError};

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let config = Config::load(&cli.overrides())?;
    debug!(
        cache = %config.cache_path.display(),
        endpoint = %config.endpoint,
        "configuration resolved"
    );

    let ctx = Context::from_config(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.command, &ctx, &mut out).await?;
    out.flush().map_err(CommandError::from)?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
