//! Runs command handler

use crate::cli::{print_report, CommonArgs};
use crate::error::Result;
use crate::harness::run_trials;
use crate::source::get_source;
use crate::stats::RunsTest;
use clap::Args;

/// Runs command arguments
#[derive(Args)]
pub struct RunsArgs {
    /// Words per trial
    #[arg(long, short = 'n')]
    pub samples: Option<usize>,

    /// Critical |z| value
    #[arg(long, short = 't')]
    pub threshold: Option<f64>,

    /// Number of trials
    #[arg(long, short = 'r')]
    pub repetitions: Option<usize>,

    /// Samples with an empty bin: fail, skip or non-exceeding
    #[arg(long)]
    pub degenerate: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run the runs command
pub fn run(args: RunsArgs) -> Result<()> {
    let mut config = args.common.load_config()?;
    let params = &mut config.runs;

    if let Some(samples) = args.samples {
        params.sample_size = samples;
    }
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    if let Some(repetitions) = args.repetitions {
        params.repetitions = repetitions;
    }
    if let Some(policy) = &args.degenerate {
        params.degenerate = policy.parse()?;
    }

    config.validate_runs()?;

    let engine = RunsTest::from_config(&config.runs)?;
    let source = get_source(&config.source)?;
    let report = run_trials(
        &engine,
        source.as_ref(),
        config.runs.repetitions,
        config.runs.degenerate,
    )?;

    print_report(&config, &report)
}
