//! Trial harness
//!
//! Repeats one test engine against fresh samples and reports how often the
//! statistic crossed its critical threshold. For a good source this rate should
//! sit near the significance level the threshold was chosen for.
//!
//! Every trial opens its own stream from the source and drops it before the
//! next trial starts. Any source failure aborts the whole run; there is no
//! partial report.

use crate::error::{Error, Result};
use crate::source::EntropySource;
use crate::stats::TestEngine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// What to do with a trial whose runs-test variance is zero or undefined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Abort the run with `DegenerateSample`
    #[default]
    Fail,
    /// Drop the trial from the denominator
    Skip,
    /// Count the trial as evaluated but never as exceeding
    NonExceeding,
}

impl DegeneratePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegeneratePolicy::Fail => "fail",
            DegeneratePolicy::Skip => "skip",
            DegeneratePolicy::NonExceeding => "non-exceeding",
        }
    }

    pub fn all() -> &'static [DegeneratePolicy] {
        &[
            DegeneratePolicy::Fail,
            DegeneratePolicy::Skip,
            DegeneratePolicy::NonExceeding,
        ]
    }
}

impl FromStr for DegeneratePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fail" => Ok(DegeneratePolicy::Fail),
            "skip" => Ok(DegeneratePolicy::Skip),
            "non-exceeding" => Ok(DegeneratePolicy::NonExceeding),
            _ => Err(Error::Config(format!(
                "Unknown degenerate policy: {}. Valid options: fail, skip, non-exceeding",
                s
            ))),
        }
    }
}

impl fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one harness run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessReport {
    /// Engine name
    pub test: String,
    /// Entropy source name
    pub source: String,
    /// Words drawn per trial
    pub sample_size: usize,
    /// Critical value compared against
    pub threshold: f64,
    /// Trials requested
    pub repetitions: usize,
    /// Trials counted in the denominator
    pub evaluated: usize,
    /// Degenerate trials dropped under `DegeneratePolicy::Skip`
    pub skipped: usize,
    /// Trials whose statistic exceeded the threshold
    pub exceeded: usize,
}

impl HarnessReport {
    /// Exceedance rate in percent: `exceeded * 100 / evaluated`
    pub fn percentage(&self) -> f64 {
        (self.exceeded * 100) as f64 / self.evaluated as f64
    }
}

impl fmt::Display for HarnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

/// Run `engine` `repetitions` times against fresh samples from `source`
pub fn run_trials(
    engine: &dyn TestEngine,
    source: &dyn EntropySource,
    repetitions: usize,
    policy: DegeneratePolicy,
) -> Result<HarnessReport> {
    if repetitions == 0 {
        return Err(Error::Config("Repetitions must be at least 1".to_string()));
    }

    info!(
        test = engine.name(),
        source = source.name(),
        sample_size = engine.sample_size(),
        threshold = engine.threshold(),
        repetitions,
        "starting trials"
    );

    let mut evaluated = 0;
    let mut skipped = 0;
    let mut exceeded = 0;

    for trial in 0..repetitions {
        match run_trial(engine, source) {
            Ok(statistic) => {
                evaluated += 1;
                let over = engine.exceeds(statistic);
                if over {
                    exceeded += 1;
                }
                debug!(trial, statistic, exceeded = over, "trial complete");
            }
            Err(Error::DegenerateSample(reason)) => match policy {
                DegeneratePolicy::Fail => return Err(Error::DegenerateSample(reason)),
                DegeneratePolicy::Skip => {
                    skipped += 1;
                    warn!(trial, %reason, "skipping degenerate trial");
                }
                DegeneratePolicy::NonExceeding => {
                    evaluated += 1;
                    warn!(trial, %reason, "degenerate trial counted as non-exceeding");
                }
            },
            Err(e) => return Err(e),
        }
    }

    if evaluated == 0 {
        return Err(Error::DegenerateSample(format!(
            "all {} trials were degenerate",
            repetitions
        )));
    }

    let report = HarnessReport {
        test: engine.name().to_string(),
        source: source.name().to_string(),
        sample_size: engine.sample_size(),
        threshold: engine.threshold(),
        repetitions,
        evaluated,
        skipped,
        exceeded,
    };

    info!(
        evaluated,
        skipped,
        exceeded,
        percentage = report.percentage(),
        "trials finished"
    );

    Ok(report)
}

/// One trial: acquire a stream, draw the sample, release the stream
fn run_trial(engine: &dyn TestEngine, source: &dyn EntropySource) -> Result<f64> {
    let mut stream = source.open()?;
    engine.statistic(stream.as_mut())
}
