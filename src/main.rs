//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `acme_preflight` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting and the exit code
//!
//! Exit codes: `0` when nothing blocks issuance, `2` when at least one problem
//! does, `1` when the checks could not run.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use acme_preflight::dns::HickoryLookup;
use acme_preflight::initialization::{
    init_crypto_provider, init_logger_with, init_name_server_pool, init_resolver,
};
use acme_preflight::report::{render_json, render_plain};
use acme_preflight::{run_checks, Cli, Config, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let config: Config = Cli::parse().into();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let lookup = HickoryLookup::new(init_resolver(), init_name_server_pool());

    match run_checks(&config, &lookup).await {
        Ok(report) => {
            let rendered = match config.output {
                OutputFormat::Plain => render_plain(&report),
                OutputFormat::Json => {
                    render_json(&report).context("Failed to render report as JSON")?
                }
            };
            print!("{rendered}");
            if config.output == OutputFormat::Json {
                println!();
            }
            if report.is_blocking() {
                process::exit(2);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("acme_preflight error: {:#}", anyhow::Error::from(e));
            process::exit(1);
        }
    }
}
