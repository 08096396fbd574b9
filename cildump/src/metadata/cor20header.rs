//! CLR 2.0 (Cor20) header parsing.
//!
//! This module defines the [`Cor20Header`] struct, the main header for .NET assemblies
//! found in the `IMAGE_DIRECTORY_ENTRY_COM_DESCRIPTOR` data directory of PE files. For
//! this decoder its one load-bearing field is the metadata-root RVA.
//!
//! # Reference
//! - [ECMA-335 II.25.3.3](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// The main header of CIL, located at the beginning of the CLR data directory.
///
/// Only the fields that matter for locating metadata are retained; the trailing
/// RVA/size pairs (resources, strong-name signature, vtable fixups, ...) are part of
/// the 72 bytes but are not consumed by this decoder.
pub struct Cor20Header {
    /// Size of header in bytes, always 72
    pub cb: u32,
    /// The minimum version of runtime required to run this program
    pub major_runtime_version: u16,
    /// The minor portion of the version
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata
    pub meta_data_size: u32,
    /// Flags describing this runtime
    pub flags: u32,
    /// Token for the `MethodDef` or File of the entry point for the image
    pub entry_point_token: u32,
}

impl Cor20Header {
    /// Size of the on-disk structure in bytes.
    pub const SIZE: usize = 72;

    /// Create a `Cor20Header` object from a sequence of bytes
    ///
    /// # Arguments
    /// * `data` - The byte slice from which this object shall be created
    ///
    /// # Errors
    /// Returns an error if the data is too short to contain a valid CLR header, or if
    /// the header size or metadata location fields are invalid.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        if data.len() < Self::SIZE {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb != Self::SIZE as u32 {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;

        let meta_data_rva = parser.read_le::<u32>()?;
        if meta_data_rva == 0 {
            return Err(malformed_error!("Metadata RVA cannot be zero"));
        }

        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_size == 0 {
            return Err(malformed_error!("Metadata size cannot be zero"));
        }

        let flags = parser.read_le::<u32>()?;
        let entry_point_token = parser.read_le::<u32>()?;

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags,
            entry_point_token,
        })
    }
}
