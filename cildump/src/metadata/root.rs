//! Metadata root header and stream directory.
//!
//! The metadata root is the entry point for reading CLI metadata. It carries the
//! version string and the directory of named streams; the walk over it is pure
//! cursor arithmetic (the version string and every stream name are NUL-terminated
//! and padded to 4-byte boundaries).
//!
//! # Reference
//! - [ECMA-335 II.24.2.1](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{
    file::parser::Parser,
    metadata::streams::StreamHeader,
    Error::OutOfBounds,
    Result,
};

/// The MAGIC value indicating the CIL metadata root, `BSJB`
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// The header of the present metadata, providing everything needed to locate the
/// streams.
///
/// # Examples
///
/// ```rust,no_run
/// # fn example(data: &[u8]) -> cildump::Result<()> {
/// use cildump::metadata::root::Root;
///
/// let root = Root::read(data)?;
/// println!("Metadata version: {}", root.version);
/// for stream in &root.stream_headers {
///     println!("Stream: {} (offset: {}, size: {})", stream.name, stream.offset, stream.size);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Root {
    /// Magic signature for physical metadata: 0x424A5342
    pub signature: u32,
    /// `MajorVersion`
    pub major_version: u16,
    /// `MinorVersion`
    pub minor_version: u16,
    /// Number of bytes allocated to hold the version string field
    pub length: u32,
    /// Version string, NUL trimmed
    pub version: String,
    /// Reserved, always 0
    pub flags: u16,
    /// Number of streams
    pub stream_number: u16,
    /// The stream directory
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Reads a [`Root`] metadata header from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice from which this object shall be read, starting at
    ///   the metadata root and covering the whole metadata blob
    ///
    /// # Errors
    /// Returns an error if the data is too short, the signature is invalid, or the
    /// stream directory is malformed.
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 20 {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let signature = parser.read_le::<u32>()?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - {:#x}",
                signature
            ));
        }

        let major_version = parser.read_le::<u16>()?;
        let minor_version = parser.read_le::<u16>()?;
        parser.advance_by(4)?; // Reserved, always 0

        let length = parser.read_le::<u32>()?;
        match u32::checked_add(length, 16) {
            Some(version_end) => {
                if version_end as usize > data.len() {
                    return Err(OutOfBounds);
                }
            }
            None => {
                return Err(malformed_error!(
                    "Version string length causing integer overflow - {} + 16",
                    length
                ))
            }
        }

        // The version field is declared with a padded length, but the reliable walk is
        // scanning to the terminator and realigning; both agree for well-formed files.
        let version = parser.read_string_utf8()?;
        parser.align(4)?;

        let flags = parser.read_le::<u16>()?;
        let stream_count = parser.read_le::<u16>()?;
        if stream_count == 0 || stream_count > 16 {
            return Err(malformed_error!("Invalid stream count - {}", stream_count));
        }

        let mut streams = Vec::with_capacity(stream_count as usize);
        for _ in 0..stream_count {
            let stream = StreamHeader::read(&mut parser)?;

            match u32::checked_add(stream.offset, stream.size) {
                Some(range) => {
                    if range as usize > data.len() {
                        return Err(OutOfBounds);
                    }
                }
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        stream.offset,
                        stream.size
                    ))
                }
            }

            streams.push(stream);
        }

        Ok(Root {
            signature,
            major_version,
            minor_version,
            length,
            version,
            flags,
            stream_number: stream_count,
            stream_headers: streams,
        })
    }

    /// Find a stream header by name.
    ///
    /// # Arguments
    /// * `name` - The exact stream name (e.g. `#~`)
    #[must_use]
    pub fn stream_by_name(&self, name: &str) -> Option<&StreamHeader> {
        self.stream_headers.iter().find(|stream| stream.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x42, 0x53, 0x4A, 0x42,                         // BSJB
            0x01, 0x00,                                     // major = 1
            0x01, 0x00,                                     // minor = 1
            0x00, 0x00, 0x00, 0x00,                         // reserved
            0x0C, 0x00, 0x00, 0x00,                         // length = 12
            b'v', b'4', b'.', b'0', b'.', b'3', b'0', b'3',
            b'1', b'9', 0x00, 0x00,                         // "v4.0.30319\0" padded
            0x00, 0x00,                                     // flags
            0x02, 0x00,                                     // 2 streams

            0x6C, 0x00, 0x00, 0x00,                         // #~: offset
            0x04, 0x00, 0x00, 0x00,                         // #~: size
            0x23, 0x7E, 0x00, 0x00,                         // "#~\0" padded

            0x70, 0x00, 0x00, 0x00,                         // #Strings: offset
            0x10, 0x00, 0x00, 0x00,                         // #Strings: size
            0x23, 0x53, 0x74, 0x72, 0x69, 0x6E, 0x67, 0x73,
            0x00, 0x00, 0x00, 0x00,                         // "#Strings\0" padded
        ];
        // Stream ranges must fit the metadata blob; extend to cover offset + size.
        let mut data = header_bytes.to_vec();
        data.resize(0x80, 0);

        let parsed_header = Root::read(&data).unwrap();

        assert_eq!(parsed_header.signature, CIL_HEADER_MAGIC);
        assert_eq!(parsed_header.major_version, 1);
        assert_eq!(parsed_header.minor_version, 1);
        assert_eq!(parsed_header.version, "v4.0.30319");
        assert_eq!(parsed_header.flags, 0);
        assert_eq!(parsed_header.stream_number, 2);
        assert_eq!(parsed_header.stream_headers.len(), 2);
        assert_eq!(parsed_header.stream_headers[0].offset, 0x6C);
        assert_eq!(parsed_header.stream_headers[0].size, 0x4);
        assert_eq!(parsed_header.stream_headers[0].name, "#~");
        assert_eq!(parsed_header.stream_headers[1].name, "#Strings");

        assert!(parsed_header.stream_by_name("#~").is_some());
        assert!(parsed_header.stream_by_name("#Blob").is_none());
    }

    #[test]
    fn crafted_bad_signature() {
        let mut data = vec![0u8; 64];
        data[0..4].copy_from_slice(&[0x42, 0x53, 0x4A, 0x43]);

        assert!(Root::read(&data).is_err());
    }

    #[test]
    fn crafted_version_length_overflows_buffer() {
        let mut data = vec![0u8; 32];
        data[0..4].copy_from_slice(&CIL_HEADER_MAGIC.to_le_bytes());
        data[12..16].copy_from_slice(&0x100u32.to_le_bytes()); // length = 256 > buffer

        assert!(Root::read(&data).is_err());
    }

    #[test]
    fn crafted_zero_streams() {
        #[rustfmt::skip]
        let header_bytes = [
            0x42, 0x53, 0x4A, 0x42,
            0x01, 0x00,
            0x01, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            b'v', b'1', 0x00, 0x00,
            0x00, 0x00,
            0x00, 0x00,                // 0 streams
        ];

        assert!(Root::read(&header_bytes).is_err());
    }
}
