//! Parsing of CIL method-body headers.
//!
//! Supports both tiny and fat method headers as specified by ECMA-335. The decode
//! yields header and code sizes; the IL bytes themselves are sliced by the caller
//! from the surrounding buffer.
//!
//! # Reference
//! - ECMA-335 6th Edition, Partition II, Section 25.4 - Method Header Format

use bitflags::bitflags;

use crate::{
    file::io::read_le,
    Error::OutOfBounds,
    Result,
};

bitflags! {
    #[derive(PartialEq, Eq)]
    /// Flags that a method body can have
    pub struct MethodBodyFlags: u16 {
        /// Tiny method header format
        const TINY_FORMAT = 0x2;
        /// Fat method header format
        const FAT_FORMAT = 0x3;
        /// Flag of the fat method header, showing that there are more data sections appended to the header
        const MORE_SECTS = 0x8;
        /// Flag to indicate that this method should call the default constructor on all local variables
        const INIT_LOCALS = 0x10;
    }
}

/// Selects where the IL bytes of a fat-header method are sliced from.
///
/// The fat header is 12 bytes, and ECMA-335 places the code directly behind it.
/// Some extractors instead slice immediately after the first header byte, the same
/// place tiny-header code starts; that behavior is kept available for byte-exact
/// comparison against their output. Tiny headers are unaffected: their code always
/// starts 1 byte in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FatCodeOffset {
    /// Code starts after the full fat header, as ECMA-335 defines.
    #[default]
    Header,
    /// Code is sliced right after the first header byte (legacy extractor behavior).
    FlagByte,
}

/// Describes the header of one method that has been compiled to CIL bytecode.
///
/// Decoded on demand from the bytes at a method's file offset; never stored by the
/// pipeline.
pub struct MethodBody {
    /// Size of the method (length of all instructions, not counting the header) in bytes
    pub size_code: usize,
    /// Size of the method header in bytes
    pub size_header: usize,
    /// Metadata token for the local-variable signature, 0 == no local variables
    pub local_var_sig_token: u32,
    /// Maximum number of items on the operand stack
    pub max_stack: usize,
    /// Flag, indicating the type of the method header
    pub is_fat: bool,
    /// Flag, indicating to call the default constructor on all local variables
    pub is_init_local: bool,
}

impl MethodBody {
    /// Create a `MethodBody` object from a sequence of bytes.
    ///
    /// # Arguments
    /// * `data` - The byte slice starting at the method-body header
    ///
    /// # Errors
    /// Returns an error if the data is empty, too short for the declared sizes, or
    /// the first byte announces neither a tiny nor a fat header.
    pub fn from(data: &[u8]) -> Result<MethodBody> {
        if data.is_empty() {
            return Err(malformed_error!("Provided data for body parsing is empty"));
        }

        let first_byte = read_le::<u8>(data)?;
        match MethodBodyFlags::from_bits_truncate(u16::from(first_byte & 0b_0000_0011_u8)) {
            MethodBodyFlags::TINY_FORMAT => {
                // Upper 6 bits store the code size
                let size_code = (first_byte >> 2) as usize;
                if size_code + 1 > data.len() {
                    return Err(OutOfBounds);
                }

                Ok(MethodBody {
                    size_code,
                    size_header: 1,
                    local_var_sig_token: 0,
                    max_stack: 0,
                    is_fat: false,
                    is_init_local: false,
                })
            }
            MethodBodyFlags::FAT_FORMAT => {
                if data.len() < 12 {
                    return Err(OutOfBounds);
                }

                let first_duo = read_le::<u16>(data)?;

                let size_header = ((first_duo >> 12) * 4) as usize;
                let size_code = read_le::<u32>(&data[4..])? as usize;
                if data.len() < size_code + size_header {
                    return Err(OutOfBounds);
                }

                let flags_header =
                    MethodBodyFlags::from_bits_truncate(first_duo & 0b_0000_1111_1111_1111_u16);
                let max_stack = read_le::<u16>(&data[2..])? as usize;
                let local_var_sig_token = read_le::<u32>(&data[8..])?;

                Ok(MethodBody {
                    size_code,
                    size_header,
                    local_var_sig_token,
                    max_stack,
                    is_fat: true,
                    is_init_local: flags_header.contains(MethodBodyFlags::INIT_LOCALS),
                })
            }
            _ => Err(malformed_error!(
                "MethodHeader is neither FAT nor TINY - {}",
                first_byte
            )),
        }
    }

    /// Get the full size of this method
    #[must_use]
    pub fn size(&self) -> usize {
        self.size_code + self.size_header
    }

    /// Offset of the first IL byte, relative to the start of the header.
    ///
    /// # Arguments
    /// * `fat_code_offset` - Slicing behavior for fat headers; tiny headers always
    ///   yield 1
    #[must_use]
    pub fn code_offset(&self, fat_code_offset: FatCodeOffset) -> usize {
        if !self.is_fat {
            return 1;
        }

        match fat_code_offset {
            FatCodeOffset::Header => self.size_header,
            FatCodeOffset::FlagByte => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny() {
        // Header byte 0x0E: low bits 10 (tiny), size 3; followed by 3 IL bytes.
        let data = [0x0E, 0x01, 0x02, 0x03];

        let method_header = MethodBody::from(&data).unwrap();

        assert!(!method_header.is_fat);
        assert!(!method_header.is_init_local);
        assert_eq!(method_header.size_code, 3);
        assert_eq!(method_header.size_header, 1);
        assert_eq!(method_header.size(), 4);
        assert_eq!(method_header.max_stack, 0);
        assert_eq!(method_header.local_var_sig_token, 0);
        assert_eq!(method_header.code_offset(FatCodeOffset::Header), 1);
        assert_eq!(method_header.code_offset(FatCodeOffset::FlagByte), 1);
    }

    #[test]
    fn fat() {
        #[rustfmt::skip]
        let data = [
            0x13, 0x30,             // flags = fat | init_locals, header size = 3 * 4
            0x08, 0x00,             // max_stack = 8
            0x05, 0x00, 0x00, 0x00, // size_code = 5
            0x01, 0x00, 0x00, 0x11, // local_var_sig_token = 0x11000001
            0x00, 0x02, 0x7E, 0x26, 0x2A, // 5 bytes of IL
        ];

        let method_header = MethodBody::from(&data).unwrap();

        assert!(method_header.is_fat);
        assert!(method_header.is_init_local);
        assert_eq!(method_header.size_code, 5);
        assert_eq!(method_header.size_header, 12);
        assert_eq!(method_header.size(), 17);
        assert_eq!(method_header.max_stack, 8);
        assert_eq!(method_header.local_var_sig_token, 0x1100_0001);
        assert_eq!(method_header.code_offset(FatCodeOffset::Header), 12);
        assert_eq!(method_header.code_offset(FatCodeOffset::FlagByte), 1);
    }

    #[test]
    fn fat_size_field_placement() {
        // Low bits 11 announce a fat header; the code size must be read from the
        // 4-byte field at header offset +4.
        let mut data = vec![0u8; 12];
        data[0] = 0x03;
        data[1] = 0x30;
        data[4..8].copy_from_slice(&5u32.to_le_bytes());
        data.extend_from_slice(&[0u8; 5]);

        let method_header = MethodBody::from(&data).unwrap();

        assert_eq!(method_header.size_code, 5);
    }

    #[test]
    fn unrecognized_format() {
        for first_byte in [0x00_u8, 0x01, 0x04, 0x0C] {
            let data = [first_byte, 0x00, 0x00, 0x00];
            let result = MethodBody::from(&data);

            assert!(
                matches!(result, Err(crate::Error::Malformed { .. })),
                "header byte {first_byte:#04x} must be rejected"
            );
        }
    }

    #[test]
    fn tiny_truncated() {
        // Declares 3 code bytes but only 1 present.
        let data = [0x0E, 0x01];
        assert!(MethodBody::from(&data).is_err());
    }

    #[test]
    fn fat_truncated_header() {
        let data = [0x03, 0x30, 0x08, 0x00];
        assert!(MethodBody::from(&data).is_err());
    }

    #[test]
    fn empty() {
        assert!(MethodBody::from(&[]).is_err());
    }
}
