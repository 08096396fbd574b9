//! Memory-mapped file backend.
//!
//! [`crate::file::physical::Physical`] maps an on-disk PE file into the address space
//! with `memmap2`, giving the decode pipeline a single immutable, randomly-addressable
//! byte buffer without reading the whole file eagerly.

use super::Backend;
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for access to files on disk.
///
/// The mapping is created once and stays valid for the lifetime of the decode; all
/// access goes through the bounds-checked [`crate::file::Backend`] interface.
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Creates a new physical file backend by memory-mapping the given path.
    ///
    /// # Arguments
    /// * `path` - Path of the file to map
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened, or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(Error(error.to_string())),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
