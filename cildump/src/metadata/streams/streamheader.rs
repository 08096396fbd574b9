//! Stream header parsing for .NET metadata streams.
//!
//! A stream header gives the name, offset and size of one metadata stream. Its length
//! is not fixed: the name is a NUL-terminated string padded to a 4-byte boundary.
//!
//! # Reference
//! - [ECMA-335 II.24.2.2](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{file::parser::Parser, Result};

/// A stream header provides the name, and the position and length of a particular
/// table or heap, relative to the start of the metadata root.
///
/// Only the `#~` stream is consumed further by this decoder; the remaining headers
/// are retained in the directory for inspection but their contents are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    /// Offset of the stream, relative to the start of the metadata root
    pub offset: u32,
    /// Size of this stream in bytes, shall be a multiple of 4
    pub size: u32,
    /// Name of the stream, max 32 characters
    pub name: String,
}

impl StreamHeader {
    /// Read a `StreamHeader` at the parser's current position.
    ///
    /// Consumes the offset, size, and NUL-terminated name, then aligns the cursor to
    /// the next 4-byte boundary (the padding after the name belongs to the header).
    ///
    /// # Arguments
    /// * `parser` - Cursor positioned at the start of the stream header
    ///
    /// # Errors
    /// Returns an error if the data is too short or the name is overlong.
    pub fn read(parser: &mut Parser) -> Result<StreamHeader> {
        let offset = parser.read_le::<u32>()?;
        let size = parser.read_le::<u32>()?;

        let name = parser.read_string_utf8()?;
        if name.is_empty() || name.len() > 32 {
            return Err(malformed_error!("Invalid stream header name - {}", name));
        }
        parser.align(4)?;

        Ok(StreamHeader { offset, size, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            0x23, 0x7E, 0x00, 0x00,
        ];

        let mut parser = Parser::new(&header_bytes);
        let parsed_header = StreamHeader::read(&mut parser).unwrap();

        assert_eq!(parsed_header.offset, 0x6C);
        assert_eq!(parsed_header.size, 0x45A4);
        assert_eq!(parsed_header.name, "#~");
        assert_eq!(parser.pos(), 12);
    }

    #[test]
    fn crafted_name_aligns_to_four() {
        // "#GUID" + NUL is 6 bytes; the header pads to 8.
        #[rustfmt::skip]
        let header_bytes = [
            0x10, 0x00, 0x00, 0x00,
            0x20, 0x00, 0x00, 0x00,
            0x23, 0x47, 0x55, 0x49, 0x44, 0x00, 0x00, 0x00,
        ];

        let mut parser = Parser::new(&header_bytes);
        let parsed_header = StreamHeader::read(&mut parser).unwrap();

        assert_eq!(parsed_header.name, "#GUID");
        assert_eq!(parser.pos(), 16);
    }

    #[test]
    fn crafted_empty_name() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];

        let mut parser = Parser::new(&header_bytes);
        assert!(StreamHeader::read(&mut parser).is_err());
    }
}
