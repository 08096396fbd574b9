//! `MethodDef` table rows, reduced to what body extraction needs.
//!
//! A full `MethodDef` row carries six columns; only the RVA locates the method body.
//! The reader consumes the table row by row, keeping the RVA and stepping over
//! ImplFlags, Flags, Name, Signature and ParamList without decoding them.
//!
//! # Reference
//! - [ECMA-335 II.22.26](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{
    file::parser::Parser,
    metadata::{streams::TablesHeader, tables::TableId},
    Result,
};

/// One row of the `MethodDef` table. `TableId` = 0x06
///
/// Rows are kept in table order, which is also metadata-token order: entry `i`
/// describes the method with token `0x06000000 | (i + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDefRaw {
    /// `RowID`, 1-based
    pub rid: u32,
    /// RVA of the method body, 0 for methods without one (abstract, extern)
    pub rva: u32,
}

impl MethodDefRaw {
    /// Read the whole `MethodDef` table at the parser's current position.
    ///
    /// The cursor must sit on the first `MethodDef` row; on success it ends just
    /// past the last one.
    ///
    /// # Arguments
    /// * `parser` - Cursor positioned at the first row
    /// * `tables` - Tables header providing the row count and column widths
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the declared rows exceed the stream.
    pub fn read_table(parser: &mut Parser, tables: &TablesHeader) -> Result<Vec<MethodDefRaw>> {
        let row_count = tables.row_count(TableId::MethodDef);

        // ImplFlags, Flags, Name, Signature, ParamList
        let trailing_columns = 2 + 2 + tables.str_index_bytes() + tables.blob_index_bytes() + 2;

        let mut methods = Vec::with_capacity(row_count as usize);
        for rid in 1..=row_count {
            let rva = parser.read_le::<u32>()?;
            parser.advance_by(trailing_columns)?;

            methods.push(MethodDefRaw { rid, rva });
        }

        Ok(methods)
    }
}
