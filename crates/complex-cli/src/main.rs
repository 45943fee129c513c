mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

/// Exit status for a run that ended before reaching the target stoichiometry.
const EXIT_INCOMPLETE: u8 = 2;

fn main() -> ExitCode {
    match run_app() {
        Ok(code) => code,
        Err(e) => {
            error!("❌ Command failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_app() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!(
        "🚀 ComplexBuilder CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    match cli.command {
        Commands::Assemble(args) => {
            info!("Dispatching to 'assemble' command.");
            let outcome = commands::assemble::run(args)?;
            if outcome.is_complete() {
                info!("✅ Command completed successfully.");
                Ok(ExitCode::SUCCESS)
            } else {
                warn!("Assembly finished without reaching the target ({}).", outcome);
                Ok(ExitCode::from(EXIT_INCOMPLETE))
            }
        }
        Commands::Inspect(args) => {
            info!("Dispatching to 'inspect' command.");
            commands::inspect::run(args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
