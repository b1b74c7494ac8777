//! Pseudo-random backend for testing
//!
//! Uses the `rand` crate's `StdRng`. This is NOT a hardware source, but it is
//! fast, never runs dry, and is reproducible when seeded.

use crate::constants::word;
use crate::error::Result;
use crate::source::{EntropySource, WordStream};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Pseudo-random number generator backend
///
/// The generator state carries over from one trial to the next, so a seeded
/// source yields one continuous sequence across the whole harness run.
#[derive(Debug)]
pub struct PseudoSource {
    rng: Mutex<StdRng>,
}

impl PseudoSource {
    /// Create a backend seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a seeded backend
    ///
    /// Using the same seed will produce the same sequence of words.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for PseudoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for PseudoSource {
    fn name(&self) -> &'static str {
        "pseudo"
    }

    fn description(&self) -> &'static str {
        "Software PRNG, optionally seeded (for testing)"
    }

    fn open(&self) -> Result<Box<dyn WordStream + '_>> {
        // Generator state cannot be left half-updated, so a poisoned lock is still usable
        let rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Box::new(PseudoStream { rng }))
    }
}

/// Exclusive handle on the generator for one trial
struct PseudoStream<'a> {
    rng: MutexGuard<'a, StdRng>,
}

impl WordStream for PseudoStream<'_> {
    fn next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; word::BYTES];
        self.rng.fill_bytes(&mut buf);
        Ok(u32::from_le_bytes(buf))
    }
}
