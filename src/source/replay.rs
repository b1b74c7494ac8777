//! Replay backend
//!
//! Replays a fixed byte sequence, typically a dump captured from a hardware
//! device, in order across trials. Once the bytes run out every further read
//! fails with `SourceExhausted`.

use crate::constants::word;
use crate::error::{Error, Result};
use crate::source::{EntropySource, WordStream};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory replay backend
#[derive(Debug)]
pub struct ReplaySource {
    bytes: Vec<u8>,
    position: Mutex<usize>,
}

impl ReplaySource {
    /// Replay the given bytes from the start
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            position: Mutex::new(0),
        }
    }

    /// Replay words, encoded little-endian exactly as a device would emit them
    pub fn from_words(words: &[u32]) -> Self {
        Self::new(
            words
                .iter()
                .flat_map(|w| w.to_le_bytes())
                .collect::<Vec<u8>>(),
        )
    }

    /// Load a captured dump file in full
    ///
    /// Only regular files are accepted: a character device such as
    /// `/dev/hwrng` never reaches end of file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(unavailable)?;
        if !metadata.is_file() {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "replay needs a regular file, use the device backend for devices",
            )));
        }

        let bytes = fs::read(path).map_err(unavailable)?;
        Ok(Self::new(bytes))
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len() - *self.lock()
    }

    /// Start the replay over from the first byte
    pub fn rewind(&self) {
        *self.lock() = 0;
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EntropySource for ReplaySource {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn description(&self) -> &'static str {
        "Captured byte dump replayed in order across trials"
    }

    fn open(&self) -> Result<Box<dyn WordStream + '_>> {
        Ok(Box::new(ReplayStream {
            bytes: &self.bytes,
            position: self.lock(),
        }))
    }
}

/// Cursor into the replay buffer, held exclusively for one trial
struct ReplayStream<'a> {
    bytes: &'a [u8],
    position: MutexGuard<'a, usize>,
}

impl WordStream for ReplayStream<'_> {
    fn next_u32(&mut self) -> Result<u32> {
        let start = *self.position;
        let rest = &self.bytes[start..];

        let Some(chunk) = rest.get(..word::BYTES) else {
            return Err(Error::SourceExhausted {
                needed: word::BYTES,
                available: rest.len(),
            });
        };

        let mut buf = [0u8; word::BYTES];
        buf.copy_from_slice(chunk);
        *self.position = start + word::BYTES;
        Ok(u32::from_le_bytes(buf))
    }
}
