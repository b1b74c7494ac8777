//! Randomness test engines
//!
//! Each engine draws one sample from an open entropy stream and reduces it to a
//! single statistic, which the trial harness compares against a critical
//! threshold:
//! - Chi-squared: uniformity of residue classes modulo K
//! - Runs (Wald-Wolfowitz): number of runs above/below the midpoint

pub mod chi_squared;
pub mod runs;

pub use chi_squared::{chi_squared, ClassHistogram, ChiSquaredTest};
pub use runs::{Bin, RunsSummary, RunsTest};

use crate::error::{Error, Result};
use crate::source::WordStream;

/// A statistical test that can be repeated by the trial harness
pub trait TestEngine {
    /// Short name used in reports (e.g., "chi-squared")
    fn name(&self) -> &'static str;

    /// Number of words drawn per trial
    fn sample_size(&self) -> usize;

    /// Critical value the statistic is compared against
    fn threshold(&self) -> f64;

    /// Draw one sample from `stream` and compute its statistic
    fn statistic(&self, stream: &mut dyn WordStream) -> Result<f64>;

    /// Whether a statistic rejects the null hypothesis
    ///
    /// Defaults to a one-sided `statistic > threshold` check.
    fn exceeds(&self, statistic: f64) -> bool {
        statistic > self.threshold()
    }
}

/// Critical values must be finite and non-negative
pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(Error::Config(format!(
            "Invalid threshold: {} (must be a finite, non-negative number)",
            threshold
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_threshold() {
        assert!(check_threshold(0.0).is_ok());
        assert!(check_threshold(16.919).is_ok());
        assert!(check_threshold(-1.0).is_err());
        assert!(check_threshold(f64::NAN).is_err());
        assert!(check_threshold(f64::INFINITY).is_err());
    }
}
