//! Status command handler
//!
//! Shows the configured entropy source and test parameters, and optionally
//! checks that the source can actually be read.

use crate::cli::CommonArgs;
use crate::error::Result;
use crate::format::available_formats;
use crate::source::{available_sources, get_source};
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Open the source and read a single word
    #[arg(long)]
    pub probe: bool,

    /// List available backends and output formats
    #[arg(long, short = 'l')]
    pub list: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run the status command
pub fn run(args: StatusArgs) -> Result<()> {
    if args.list {
        println!("Sources:");
        for info in available_sources() {
            println!("  {:<8} {}", info.name, info.description);
        }
        println!();
        println!("Formats:");
        for info in available_formats() {
            println!("  {:<8} {}", info.name, info.description);
        }
        return Ok(());
    }

    let config = args.common.load_config()?;
    let source = get_source(&config.source)?;

    println!("hwrng-stats v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Source: {} ({})", source.name(), source.description());
    if source.name() != "pseudo" {
        println!("  Path: {}", config.source.path);
    }
    if let Some(seed) = config.source.seed {
        println!("  Seed: {}", seed);
    }
    println!();

    let chi = &config.chi_squared;
    println!(
        "Chi-squared: N = {}, K = {}, T = {}, R = {}",
        chi.sample_size, chi.classes, chi.threshold, chi.repetitions
    );
    let runs = &config.runs;
    println!(
        "Runs:        N = {}, T = {}, R = {}, degenerate = {}",
        runs.sample_size, runs.threshold, runs.repetitions, runs.degenerate
    );

    if args.probe {
        println!();
        let probe = source.open().and_then(|mut stream| stream.next_u32());
        match probe {
            Ok(word) => println!("Probe: OK (read 0x{:08x})", word),
            Err(e) => println!("Probe: FAILED ({})", e),
        }
    }

    Ok(())
}
