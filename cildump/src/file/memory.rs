//! In-memory buffer backend.
//!
//! [`crate::file::memory::Memory`] wraps an owned byte buffer, for callers that already
//! hold the image in memory (tests, network-fetched assemblies, embedded payloads).

use super::Backend;
use crate::{Error::Empty, Result};

/// A backend over an owned in-memory byte buffer.
///
/// Provides the same interface as the memory-mapped [`crate::file::physical::Physical`]
/// backend, but for data that already lives in memory.
#[derive(Debug)]
pub struct Memory {
    /// The owned image bytes
    data: Vec<u8>,
}

impl Memory {
    /// Creates a new in-memory backend from an owned buffer.
    ///
    /// # Arguments
    /// * `data` - The image bytes
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if the buffer is empty.
    pub fn new(data: Vec<u8>) -> Result<Memory> {
        if data.is_empty() {
            return Err(Empty);
        }

        Ok(Memory { data })
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
