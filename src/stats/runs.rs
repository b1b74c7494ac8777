//! Runs test (Wald-Wolfowitz)
//!
//! Splits the sample into two bins around the midpoint of the `u32` range and
//! counts the runs, i.e. maximal stretches of consecutive words in the same bin.
//! Too few runs means clustering, too many means oscillation. The run count is
//! normalised to a z-score with a ±0.5 continuity correction that always pulls
//! the statistic toward the expected count.

use crate::config::RunsConfig;
use crate::constants::word::MIDPOINT;
use crate::error::{Error, Result};
use crate::source::WordStream;
use crate::stats::{check_threshold, TestEngine};

/// Side of the midpoint a word falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bin {
    /// At or below the midpoint
    Lower,
    /// Strictly above the midpoint
    Upper,
}

impl Bin {
    pub fn of(value: u32) -> Self {
        if value > MIDPOINT {
            Bin::Upper
        } else {
            Bin::Lower
        }
    }
}

/// Bin counts and observed runs of one sample, built in a single ordered pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunsSummary {
    lower: u64,
    upper: u64,
    runs: u64,
    last: Option<Bin>,
}

impl RunsSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        let mut summary = Self::new();
        for value in values {
            summary.push(value);
        }
        summary
    }

    /// Append the next word of the sample
    pub fn push(&mut self, value: u32) {
        let bin = Bin::of(value);
        match bin {
            Bin::Lower => self.lower += 1,
            Bin::Upper => self.upper += 1,
        }
        if self.last != Some(bin) {
            self.runs += 1;
            self.last = Some(bin);
        }
    }

    /// Words in the lower bin (n1)
    pub fn n1(&self) -> u64 {
        self.lower
    }

    /// Words in the upper bin (n2)
    pub fn n2(&self) -> u64 {
        self.upper
    }

    /// Sample size N = n1 + n2
    pub fn len(&self) -> u64 {
        self.lower + self.upper
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn observed_runs(&self) -> u64 {
        self.runs
    }

    /// `2 * n1 * n2 / N + 1`
    pub fn expected_runs(&self) -> f64 {
        if self.is_empty() {
            return 1.0;
        }
        2.0 * self.lower as f64 * self.upper as f64 / self.len() as f64 + 1.0
    }

    /// `sqrt((E - 1)(E - 2) / (N - 1))` where E is the expected run count
    ///
    /// Fails with `DegenerateSample` when N < 2 or the radicand is not positive,
    /// which happens whenever one bin is empty.
    pub fn std_dev(&self) -> Result<f64> {
        let n = self.len();
        if n < 2 {
            return Err(Error::DegenerateSample(format!(
                "runs test needs at least 2 values, got {}",
                n
            )));
        }

        let expected = self.expected_runs();
        let radicand = (expected - 1.0) * (expected - 2.0) / (n - 1) as f64;
        if !radicand.is_finite() || radicand <= 0.0 {
            return Err(Error::DegenerateSample(format!(
                "run count variance is {} (n1 = {}, n2 = {})",
                radicand, self.lower, self.upper
            )));
        }

        Ok(radicand.sqrt())
    }

    /// `+0.5` below the expected run count, `-0.5` otherwise
    pub fn continuity_weight(&self) -> f64 {
        if (self.runs as f64) < self.expected_runs() {
            0.5
        } else {
            -0.5
        }
    }

    /// Continuity-corrected z-score of the observed run count
    pub fn z_score(&self) -> Result<f64> {
        let std_dev = self.std_dev()?;
        let expected = self.expected_runs();
        Ok((self.runs as f64 - expected + self.continuity_weight()) / std_dev)
    }
}

/// Runs test engine
#[derive(Debug, Clone)]
pub struct RunsTest {
    sample_size: usize,
    threshold: f64,
}

impl RunsTest {
    /// Create an engine, rejecting empty samples and bad thresholds
    ///
    /// A one-word sample is accepted: every trial then fails with
    /// `DegenerateSample` and the harness's degenerate policy decides.
    pub fn new(sample_size: usize, threshold: f64) -> Result<Self> {
        if sample_size == 0 {
            return Err(Error::Config("Runs test sample size must be at least 1".to_string()));
        }
        check_threshold(threshold)?;

        Ok(Self {
            sample_size,
            threshold,
        })
    }

    pub fn from_config(config: &RunsConfig) -> Result<Self> {
        Self::new(config.sample_size, config.threshold)
    }
}

impl TestEngine for RunsTest {
    fn name(&self) -> &'static str {
        "runs"
    }

    fn sample_size(&self) -> usize {
        self.sample_size
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn statistic(&self, stream: &mut dyn WordStream) -> Result<f64> {
        let mut summary = RunsSummary::new();
        for _ in 0..self.sample_size {
            summary.push(stream.next_u32()?);
        }

        summary.z_score()
    }

    /// Two-sided: |z| > threshold
    fn exceeds(&self, statistic: f64) -> bool {
        statistic.abs() > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::pseudo::PseudoSource;
    use crate::source::replay::ReplaySource;
    use crate::source::EntropySource;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};

    const LOW: u32 = 0;
    const HIGH: u32 = u32::MAX;

    fn alternating(n: usize) -> Vec<u32> {
        (0..n).map(|i| if i % 2 == 0 { LOW } else { HIGH }).collect()
    }

    #[test]
    fn test_bin_boundary() {
        assert_eq!(Bin::of(0), Bin::Lower);
        assert_eq!(Bin::of(MIDPOINT - 1), Bin::Lower);
        assert_eq!(Bin::of(MIDPOINT), Bin::Lower);
        assert_eq!(Bin::of(MIDPOINT + 1), Bin::Upper);
        assert_eq!(Bin::of(u32::MAX), Bin::Upper);
    }

    #[test]
    fn test_counts_and_run_bounds() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for n in [1usize, 2, 3, 50, 999] {
            let values: Vec<u32> = (0..n).map(|_| rng.gen()).collect();
            let summary = RunsSummary::from_values(values);

            assert_eq!(summary.n1() + summary.n2(), n as u64);
            assert!(summary.observed_runs() >= 1);
            assert!(summary.observed_runs() <= n as u64);
        }
    }

    #[test]
    fn test_single_bin_is_one_run() {
        let summary = RunsSummary::from_values([1, 1, 1, 1]);
        assert_eq!(summary.observed_runs(), 1);
        assert_eq!(summary.n1(), 4);
        assert_eq!(summary.n2(), 0);
        assert_eq!(summary.expected_runs(), 1.0);

        let summary = RunsSummary::from_values([HIGH; 6]);
        assert_eq!(summary.n2(), 6);
        assert_eq!(summary.expected_runs(), 1.0);
    }

    #[test]
    fn test_all_lower_is_degenerate() {
        let summary = RunsSummary::from_values([1, 1, 1, 1]);
        assert!(matches!(summary.std_dev(), Err(Error::DegenerateSample(_))));
        assert!(matches!(summary.z_score(), Err(Error::DegenerateSample(_))));
    }

    #[test]
    fn test_tiny_samples_are_degenerate() {
        assert!(matches!(
            RunsSummary::from_values([LOW]).std_dev(),
            Err(Error::DegenerateSample(_))
        ));
        // n1 = n2 = 1: E = 2, radicand 0
        assert!(matches!(
            RunsSummary::from_values([LOW, HIGH]).std_dev(),
            Err(Error::DegenerateSample(_))
        ));
        assert!(RunsSummary::new().std_dev().is_err());
    }

    #[test]
    fn test_alternating_eight_values() {
        let summary = RunsSummary::from_values(alternating(8));

        assert_eq!(summary.n1(), 4);
        assert_eq!(summary.n2(), 4);
        assert_eq!(summary.observed_runs(), 8);
        assert_relative_eq!(summary.expected_runs(), 5.0);
        assert_eq!(summary.continuity_weight(), -0.5);

        // sqrt(4 * 3 / 7)
        let std_dev = summary.std_dev().unwrap();
        assert_relative_eq!(std_dev, 1.309_307_341_415_954_3, epsilon = 1e-12);

        // (8 - 5 - 0.5) / sqrt(12 / 7)
        let z = summary.z_score().unwrap();
        assert_relative_eq!(z, 2.5 / (12.0_f64 / 7.0).sqrt());
        assert_relative_eq!(z, 1.909_406_539_564_933_6, epsilon = 1e-12);
    }

    #[test]
    fn test_alternating_drives_negative_weight() {
        for n in [4usize, 10, 100, 1000] {
            let summary = RunsSummary::from_values(alternating(n));
            assert_eq!(summary.observed_runs(), n as u64);
            assert!(summary.observed_runs() as f64 > summary.expected_runs());
            assert_eq!(summary.continuity_weight(), -0.5);
        }
    }

    #[test]
    fn test_clustered_sample_positive_weight() {
        let summary = RunsSummary::from_values([LOW, LOW, LOW, LOW, HIGH, HIGH, HIGH, HIGH]);

        assert_eq!(summary.observed_runs(), 2);
        assert_eq!(summary.continuity_weight(), 0.5);
        let z = summary.z_score().unwrap();
        assert_relative_eq!(z, -2.5 / (12.0_f64 / 7.0).sqrt());
    }

    #[test]
    fn test_correction_pulls_toward_mean() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let values: Vec<u32> = (0..40).map(|_| rng.gen()).collect();
            let summary = RunsSummary::from_values(values);
            let Ok(std_dev) = summary.std_dev() else {
                continue;
            };

            let raw = (summary.observed_runs() as f64 - summary.expected_runs()) / std_dev;
            let corrected = summary.z_score().unwrap();
            assert!(corrected.abs() <= raw.abs() + 0.5 / std_dev);
            if raw.abs() * std_dev >= 0.5 {
                assert!(corrected.abs() <= raw.abs());
            }
        }
    }

    #[test]
    fn test_engine_matches_summary() {
        let values = alternating(8);
        let source = ReplaySource::from_words(&values);
        let engine = RunsTest::new(8, 1.96).unwrap();

        let mut stream = source.open().unwrap();
        let z = engine.statistic(stream.as_mut()).unwrap();
        assert_eq!(z, RunsSummary::from_values(values).z_score().unwrap());
    }

    #[test]
    fn test_engine_degenerate_sample() {
        let source = ReplaySource::from_words(&[1, 1, 1, 1]);
        let engine = RunsTest::new(4, 1.96).unwrap();

        let mut stream = source.open().unwrap();
        assert!(matches!(
            engine.statistic(stream.as_mut()),
            Err(Error::DegenerateSample(_))
        ));
    }

    #[test]
    fn test_engine_single_word_sample_is_degenerate() {
        let source = ReplaySource::from_words(&[u32::MAX]);
        let engine = RunsTest::new(1, 1.96).unwrap();

        let mut stream = source.open().unwrap();
        assert!(matches!(
            engine.statistic(stream.as_mut()),
            Err(Error::DegenerateSample(_))
        ));
    }

    #[test]
    fn test_engine_deterministic_for_same_bytes() {
        let engine = RunsTest::new(1000, 1.96).unwrap();
        let run = || {
            let source = PseudoSource::with_seed(314);
            let mut stream = source.open().unwrap();
            engine.statistic(stream.as_mut()).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_engine_two_sided_exceedance() {
        let engine = RunsTest::new(1000, 1.96).unwrap();
        assert!(engine.exceeds(2.0));
        assert!(engine.exceeds(-2.0));
        assert!(!engine.exceeds(1.96));
        assert!(!engine.exceeds(-1.5));
    }

    #[test]
    fn test_engine_validation() {
        assert!(RunsTest::new(0, 1.96).is_err());
        assert!(RunsTest::new(2, -1.0).is_err());
        assert!(RunsTest::new(1, 1.96).is_ok());

        let engine = RunsTest::from_config(&RunsConfig::default()).unwrap();
        assert_eq!(engine.sample_size(), 1000);
        assert_eq!(engine.threshold(), 1.96);
        assert_eq!(engine.name(), "runs");
    }
}
