//! hwrng-stats: empirical randomness test rates for hardware RNGs
//!
//! A library and CLI tool that repeatedly samples 32-bit words from an entropy
//! source, runs a classical randomness test on each sample, and reports the
//! fraction of trials whose statistic crossed a fixed critical value.
//!
//! ## Features
//!
//! - Chi-squared uniformity test over residue classes
//! - Wald-Wolfowitz runs test with continuity correction
//! - Device, seeded pseudo-random and replay backends
//! - TOML configuration + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use hwrng_stats::harness::{run_trials, DegeneratePolicy};
//! use hwrng_stats::source::pseudo::PseudoSource;
//! use hwrng_stats::stats::RunsTest;
//!
//! let source = PseudoSource::with_seed(42);
//! let engine = RunsTest::new(1000, 1.96).unwrap();
//!
//! let report = run_trials(&engine, &source, 100, DegeneratePolicy::Fail).unwrap();
//! assert_eq!(report.evaluated, 100);
//! println!("{}", report);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod harness;
pub mod source;
pub mod stats;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use harness::{run_trials, DegeneratePolicy, HarnessReport};
pub use source::{EntropySource, WordStream};
pub use stats::TestEngine;
