//! GreenGap CLI - Rebound-effect analytics
//!
//! Usage:
//!   greengap simulate --days 30          Generate a demo dataset
//!   greengap analyze --seed 42           Analyze simulated data
//!   greengap import --file data.csv      Analyze a dataset
//!   greengap scenario --file data.csv -r 0.2
//!   greengap serve --port 8000           Start web server

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use greengap_core::AnalysisConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config =
        AnalysisConfig::load(cli.config.as_deref()).context("Failed to load analysis config")?;

    match cli.command {
        Commands::Simulate { days, seed, json } => {
            commands::cmd_simulate(&config, days, seed, json)
        }
        Commands::Analyze {
            days,
            seed,
            reduction_factor,
            json,
        } => commands::cmd_analyze(&config, days, seed, reduction_factor, json).await,
        Commands::Import {
            file,
            reduction_factor,
            json,
        } => commands::cmd_import(&config, &file, reduction_factor, json).await,
        Commands::Scenario {
            file,
            reduction_factor,
        } => commands::cmd_scenario(&file, reduction_factor),
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => commands::cmd_serve(config, &host, port, allowed_origins).await,
    }
}
