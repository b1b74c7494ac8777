//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod chi_squared;
pub mod config;
pub mod runs;
pub mod status;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::harness::HarnessReport;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Empirical randomness test rates for hardware random number generators
#[derive(Parser)]
#[command(name = "hwrng-stats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Repeat the chi-squared uniformity test
    ChiSquared(chi_squared::ChiSquaredArgs),

    /// Repeat the Wald-Wolfowitz runs test
    Runs(runs::RunsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show source and test settings
    Status(status::StatusArgs),
}

/// Options shared by the test commands
#[derive(Args)]
pub struct CommonArgs {
    /// Entropy backend (device, pseudo, replay)
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Device path, or dump file for the replay backend
    #[arg(long, short = 'd')]
    pub device: Option<String>,

    /// Seed for the pseudo backend
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format (text, json)
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Read settings from this file instead of the user config
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    /// Load the config file and apply the command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(backend) = &self.backend {
            config.source.backend = backend.clone();
        }
        if let Some(device) = &self.device {
            config.source.path = device.clone();
        }
        if self.seed.is_some() {
            config.source.seed = self.seed;
        }
        if let Some(format) = &self.format {
            config.output.format = format.clone();
        }

        Ok(config)
    }
}

/// Print a report to stdout in the configured format
pub(crate) fn print_report(config: &Config, report: &HarnessReport) -> Result<()> {
    let formatter = get_formatter(&config.output.format).ok_or_else(|| {
        let names: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
        Error::Config(format!(
            "Unknown output format: {}. Valid options: {}",
            config.output.format,
            names.join(", ")
        ))
    })?;

    println!("{}", formatter.format(report)?);
    Ok(())
}

/// Route log output to stderr so stdout carries only the report
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::ChiSquared(args) => chi_squared::run(args),
        Commands::Runs(args) => runs::run(args),
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args),
    }
}
