//! Device backend
//!
//! Reads raw bytes from a character device such as `/dev/hwrng`, or from any
//! regular file. The path is opened fresh for every trial and closed when the
//! trial's stream is dropped.

use crate::error::{Error, Result};
use crate::source::{EntropySource, WordReader, WordStream};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Byte device backend
#[derive(Debug, Clone)]
pub struct DeviceSource {
    path: PathBuf,
}

impl DeviceSource {
    /// Create a backend reading from `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The device path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntropySource for DeviceSource {
    fn name(&self) -> &'static str {
        "device"
    }

    fn description(&self) -> &'static str {
        "Raw byte device or file, reopened for every trial"
    }

    fn open(&self) -> Result<Box<dyn WordStream + '_>> {
        let file = File::open(&self.path).map_err(|source| Error::SourceUnavailable {
            path: self.path.clone(),
            source,
        })?;
        trace!(path = %self.path.display(), "opened entropy device");

        // Unbuffered: a BufReader would pull more entropy than the trial uses
        Ok(Box::new(WordReader::new(file, &self.path)))
    }
}
