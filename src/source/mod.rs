//! Entropy sources
//!
//! This module defines the `EntropySource` trait and the backends that feed the
//! test engines. Every backend hands out 32-bit words decoded little-endian from
//! a raw byte stream, four bytes per word.
//!
//! A source is opened once per trial. The returned `WordStream` is the scoped
//! handle for that trial's sampling phase: dropping it releases the underlying
//! device, which happens on every exit path including a failed read.
//!
//! ## Adding a backend
//! 1. Create `src/source/{backend_name}.rs` implementing `EntropySource`
//! 2. Add `pub mod {backend_name};` below
//! 3. Register it in `get_source` and `available_sources`

pub mod device;
pub mod pseudo;
pub mod replay;

use crate::config::SourceConfig;
use crate::constants::word;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// An open stream of sampled words
pub trait WordStream {
    /// Consume the next 4 bytes of the stream as a little-endian `u32`
    fn next_u32(&mut self) -> Result<u32>;
}

/// A provider of entropy streams
pub trait EntropySource: Send + Sync {
    /// Returns the backend name (e.g., "device", "pseudo", "replay")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this backend
    fn description(&self) -> &'static str;

    /// Acquire a stream handle for one trial
    fn open(&self) -> Result<Box<dyn WordStream + '_>>;
}

/// Decodes words from any byte reader without reading ahead
///
/// Each call pulls exactly [`word::BYTES`] bytes from the reader, so a device
/// is never drained past what the trial asked for.
#[derive(Debug)]
pub struct WordReader<R> {
    reader: R,
    origin: PathBuf,
}

impl<R: Read> WordReader<R> {
    /// Wrap a reader; `origin` names it in error messages
    pub fn new(reader: R, origin: impl AsRef<Path>) -> Self {
        Self {
            reader,
            origin: origin.as_ref().to_path_buf(),
        }
    }
}

impl<R: Read> WordStream for WordReader<R> {
    fn next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; word::BYTES];
        let mut filled = 0;

        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(Error::SourceExhausted {
                        needed: word::BYTES,
                        available: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::SourceUnavailable {
                        path: self.origin.clone(),
                        source,
                    })
                }
            }
        }

        Ok(u32::from_le_bytes(buf))
    }
}

/// Information about a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Backend name (used in config/CLI)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Build the configured entropy source
pub fn get_source(config: &SourceConfig) -> Result<Box<dyn EntropySource>> {
    match config.backend.to_lowercase().as_str() {
        "device" => Ok(Box::new(device::DeviceSource::new(&config.path))),
        "pseudo" => Ok(match config.seed {
            Some(seed) => Box::new(pseudo::PseudoSource::with_seed(seed)),
            None => Box::new(pseudo::PseudoSource::new()),
        }),
        "replay" => Ok(Box::new(replay::ReplaySource::from_file(&config.path)?)),
        other => Err(Error::Config(format!("Unknown entropy source: {}", other))),
    }
}

/// List all available backends with their info
pub fn available_sources() -> Vec<SourceInfo> {
    vec![
        SourceInfo {
            name: "device".to_string(),
            description: "Raw byte device or file, reopened for every trial".to_string(),
        },
        SourceInfo {
            name: "pseudo".to_string(),
            description: "Software PRNG, optionally seeded (for testing)".to_string(),
        },
        SourceInfo {
            name: "replay".to_string(),
            description: "Captured byte dump replayed in order across trials".to_string(),
        },
    ]
}
