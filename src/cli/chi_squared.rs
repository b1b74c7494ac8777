//! Chi-squared command handler

use crate::cli::{print_report, CommonArgs};
use crate::error::Result;
use crate::harness::{run_trials, DegeneratePolicy};
use crate::source::get_source;
use crate::stats::ChiSquaredTest;
use clap::Args;

/// Chi-squared command arguments
#[derive(Args)]
pub struct ChiSquaredArgs {
    /// Words per trial
    #[arg(long, short = 'n')]
    pub samples: Option<usize>,

    /// Residue classes
    #[arg(long, short = 'k')]
    pub classes: Option<usize>,

    /// Critical chi-squared value for classes - 1 degrees of freedom
    #[arg(long, short = 't')]
    pub threshold: Option<f64>,

    /// Number of trials
    #[arg(long, short = 'r')]
    pub repetitions: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run the chi-squared command
pub fn run(args: ChiSquaredArgs) -> Result<()> {
    let mut config = args.common.load_config()?;
    let params = &mut config.chi_squared;

    if let Some(samples) = args.samples {
        params.sample_size = samples;
    }
    if let Some(classes) = args.classes {
        params.classes = classes;
    }
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    if let Some(repetitions) = args.repetitions {
        params.repetitions = repetitions;
    }

    config.validate_chi_squared()?;

    let engine = ChiSquaredTest::from_config(&config.chi_squared)?;
    let source = get_source(&config.source)?;

    // Every chi-squared sample is well defined, the policy never applies
    let report = run_trials(
        &engine,
        source.as_ref(),
        config.chi_squared.repetitions,
        DegeneratePolicy::Fail,
    )?;

    print_report(&config, &report)
}
