//! Chi-squared uniformity test
//!
//! Sorts every sampled word into one of K residue classes (`value mod K`) and
//! measures how far the class occupancy strays from uniform with the classical
//! goodness-of-fit statistic
//!
//! ```text
//! chi_sq = sum over classes of (observed - expected)^2 / expected,  expected = N / K
//! ```
//!
//! `expected` stays fractional when K does not divide N. The caller supplies
//! the critical value for K - 1 degrees of freedom.

use crate::config::ChiSquaredConfig;
use crate::error::{Error, Result};
use crate::source::WordStream;
use crate::stats::{check_threshold, TestEngine};
use std::num::NonZeroUsize;

/// Occupancy count per residue class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHistogram {
    counts: Vec<u64>,
}

impl ClassHistogram {
    /// An empty histogram with `classes` buckets
    pub fn new(classes: NonZeroUsize) -> Self {
        Self {
            counts: vec![0; classes.get()],
        }
    }

    /// Classify every value of a sample
    pub fn classify(values: impl IntoIterator<Item = u32>, classes: NonZeroUsize) -> Self {
        let mut histogram = Self::new(classes);
        for value in values {
            histogram.record(value);
        }
        histogram
    }

    /// Count one value in the class `value mod K`
    pub fn record(&mut self, value: u32) {
        // counts is never empty, see `new`
        let class = u64::from(value) % self.counts.len() as u64;
        self.counts[class as usize] += 1;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn classes(&self) -> usize {
        self.counts.len()
    }

    /// Number of values classified so far
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Expected occupancy per class under uniformity
    pub fn expected(&self) -> f64 {
        self.total() as f64 / self.classes() as f64
    }
}

/// Chi-squared statistic of a histogram against uniform occupancy
///
/// An empty histogram has no deviation and scores 0.
pub fn chi_squared(histogram: &ClassHistogram) -> f64 {
    if histogram.total() == 0 {
        return 0.0;
    }

    let expected = histogram.expected();
    histogram
        .counts()
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Chi-squared test engine
#[derive(Debug, Clone)]
pub struct ChiSquaredTest {
    sample_size: usize,
    classes: NonZeroUsize,
    threshold: f64,
}

impl ChiSquaredTest {
    /// Create an engine, rejecting empty samples, zero classes and bad thresholds
    pub fn new(sample_size: usize, classes: usize, threshold: f64) -> Result<Self> {
        if sample_size == 0 {
            return Err(Error::Config("Chi-squared sample size must be at least 1".to_string()));
        }
        let classes = NonZeroUsize::new(classes).ok_or_else(|| {
            Error::Config("Chi-squared class count must be at least 1".to_string())
        })?;
        check_threshold(threshold)?;

        Ok(Self {
            sample_size,
            classes,
            threshold,
        })
    }

    pub fn from_config(config: &ChiSquaredConfig) -> Result<Self> {
        Self::new(config.sample_size, config.classes, config.threshold)
    }

    pub fn classes(&self) -> usize {
        self.classes.get()
    }
}

impl TestEngine for ChiSquaredTest {
    fn name(&self) -> &'static str {
        "chi-squared"
    }

    fn sample_size(&self) -> usize {
        self.sample_size
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn statistic(&self, stream: &mut dyn WordStream) -> Result<f64> {
        let mut histogram = ClassHistogram::new(self.classes);
        for _ in 0..self.sample_size {
            histogram.record(stream.next_u32()?);
        }
        debug_assert_eq!(histogram.total(), self.sample_size as u64);

        Ok(chi_squared(&histogram))
    }
}
