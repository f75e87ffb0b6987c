//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// GreenGap - Measure how much of an efficiency gain survives real-world use
#[derive(Parser)]
#[command(name = "greengap")]
#[command(about = "Rebound-effect analytics for energy efficiency interventions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analysis config file (defaults to the platform data dir, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a simulated baseline/expected/actual dataset
    Simulate {
        /// Number of days (defaults to the configured simulation length)
        #[arg(short, long)]
        days: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the full analysis over simulated data
    Analyze {
        /// Number of days (defaults to the configured simulation length)
        #[arg(short, long)]
        days: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// What-if reduction factor (0-1)
        #[arg(short, long)]
        reduction_factor: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a CSV or JSON consumption dataset
    Import {
        /// Dataset file (CSV with header row, or JSON array)
        #[arg(short, long)]
        file: PathBuf,

        /// What-if reduction factor (0-1)
        #[arg(short, long)]
        reduction_factor: Option<f64>,

        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project a further reduction for a dataset
    Scenario {
        /// Dataset file (CSV with header row, or JSON array)
        #[arg(short, long)]
        file: PathBuf,

        /// What-if reduction factor (0-1)
        #[arg(short, long)]
        reduction_factor: f64,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable; overrides GREENGAP_ALLOWED_ORIGINS)
        #[arg(long = "allowed-origin")]
        allowed_origins: Vec<String>,
    },
}
