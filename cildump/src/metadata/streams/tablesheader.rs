//! Header of the `#~` compressed tables stream.
//!
//! The `#~` stream packs all logical metadata tables into one blob. Its header says
//! which tables are present (a 64-bit valid mask), how many rows each has, and how
//! wide heap indexes are. Everything this decoder needs to step over rows it never
//! decodes - index widths, row widths, the offset where row data begins - derives
//! from this header and nothing else.
//!
//! # Reference
//! - [ECMA-335 II.24.2.6](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use strum::IntoEnumIterator;

use crate::{
    file::parser::Parser, metadata::tables::TableId, Error::OutOfBounds, Result,
};

/// Heap-size flag: indexes into the `#Strings` heap are 4 bytes wide
const HEAP_LARGE_STRINGS: u8 = 0x01;
/// Heap-size flag: indexes into the `#GUID` heap are 4 bytes wide
const HEAP_LARGE_GUID: u8 = 0x02;
/// Heap-size flag: indexes into the `#Blob` heap are 4 bytes wide
const HEAP_LARGE_BLOB: u8 = 0x04;

/// Summary information for a metadata table
#[derive(Debug, Clone)]
pub struct TableSummary {
    /// The table this entry describes
    pub table_id: TableId,
    /// Its row count
    pub row_count: u32,
}

/// The header of the `#~` stream.
///
/// Built once per assembly. `row_counts` is a fixed 64-slot array keyed by table id;
/// a slot is nonzero only where the corresponding bit of `valid` is set.
///
/// # Examples
///
/// ```rust,no_run
/// use cildump::{TablesHeader, TableId};
///
/// # fn example(data: &[u8]) -> cildump::Result<()> {
/// let tables = TablesHeader::from(data)?;
/// println!(
///     "{} methods, string indexes are {} bytes",
///     tables.row_count(TableId::MethodDef),
///     tables.str_index_bytes(),
/// );
/// # Ok(())
/// # }
/// ```
pub struct TablesHeader {
    /// Major version of table schemata, shall be 2
    pub major_version: u8,
    /// Minor version of table schemata, shall be 0
    pub minor_version: u8,
    /// Bit vector for heap index sizes (bit 0: String, bit 1: GUID, bit 2: Blob)
    pub heap_sizes: u8,
    /// Bit vector of present tables, bit i set means table i is present
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row count per table id, zero where the table is absent
    pub row_counts: [u32; 64],
}

impl TablesHeader {
    /// Create a `TablesHeader` object from the bytes of the `#~` stream.
    ///
    /// # Arguments
    /// * `data` - The byte slice from which this object shall be created, starting at
    ///   the beginning of the `#~` stream
    ///
    /// # Errors
    /// Returns an error if the data is too short or no table is marked valid.
    pub fn from(data: &[u8]) -> Result<TablesHeader> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        parser.advance_by(4)?; // Reserved, always 0
        let major_version = parser.read_le::<u8>()?;
        let minor_version = parser.read_le::<u8>()?;
        let heap_sizes = parser.read_le::<u8>()?;
        parser.advance_by(1)?; // Reserved, always 1

        let valid = parser.read_le::<u64>()?;
        if valid == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }
        let sorted = parser.read_le::<u64>()?;

        // One row count per set bit, in ascending table-id order.
        let mut row_counts = [0u32; 64];
        for (table, row_count) in row_counts.iter_mut().enumerate() {
            if valid & (1 << table) != 0 {
                *row_count = parser.read_le::<u32>()?;
            }
        }

        Ok(TablesHeader {
            major_version,
            minor_version,
            heap_sizes,
            valid,
            sorted,
            row_counts,
        })
    }

    /// Offset of the first row of table data, relative to the stream start.
    ///
    /// The fixed 24-byte header is followed by one 4-byte row count per valid table.
    #[must_use]
    pub fn rows_offset(&self) -> usize {
        24 + self.valid.count_ones() as usize * 4
    }

    /// Returns `true` if the given table is present.
    #[must_use]
    pub fn has_table(&self, id: TableId) -> bool {
        self.valid & (1 << id as usize) != 0
    }

    /// Row count of the given table, zero if it is absent.
    #[must_use]
    pub fn row_count(&self, id: TableId) -> u32 {
        self.row_counts[id as usize]
    }

    /// Get the table count
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Width in bytes of an index into the `#Strings` heap (4 if bit 0 of the
    /// heap-size flags is set, else 2).
    #[must_use]
    pub fn str_index_bytes(&self) -> usize {
        if self.heap_sizes & HEAP_LARGE_STRINGS != 0 {
            4
        } else {
            2
        }
    }

    /// Width in bytes of an index into the `#GUID` heap.
    #[must_use]
    pub fn guid_index_bytes(&self) -> usize {
        if self.heap_sizes & HEAP_LARGE_GUID != 0 {
            4
        } else {
            2
        }
    }

    /// Width in bytes of an index into the `#Blob` heap.
    #[must_use]
    pub fn blob_index_bytes(&self) -> usize {
        if self.heap_sizes & HEAP_LARGE_BLOB != 0 {
            4
        } else {
            2
        }
    }

    /// Width in bytes of an index into the given table: 4 if the table's bit is set
    /// in the valid mask, else 2. Never guessed from anything else.
    #[must_use]
    pub fn table_index_bytes(&self, id: TableId) -> usize {
        if self.has_table(id) {
            4
        } else {
            2
        }
    }

    /// Summary of every present table, in table-id order.
    ///
    /// Tables outside the ECMA-335 id range (e.g. portable-PDB tables) are counted
    /// in `row_counts` but not listed here.
    #[must_use]
    pub fn table_summary(&self) -> Vec<TableSummary> {
        TableId::iter()
            .filter(|id| self.has_table(*id))
            .map(|id| TableSummary {
                table_id: id,
                row_count: self.row_count(id),
            })
            .collect()
    }

    /// Width in bytes of one row of the given table.
    ///
    /// Only the four tables on the path to the method list have a known layout here;
    /// everything behind `MethodDef` is never walked and yields `None`.
    ///
    /// # Arguments
    /// * `id` - The table whose row width to compute
    #[must_use]
    pub fn row_width(&self, id: TableId) -> Option<usize> {
        let str_bytes = self.str_index_bytes();

        match id {
            // Generation, Name, Mvid, EncId, EncBaseId
            TableId::Module => Some(2 + str_bytes + 3 * self.guid_index_bytes()),
            // ResolutionScope, TypeName, TypeNamespace
            TableId::TypeRef => Some(self.table_index_bytes(TableId::ModuleRef) + 2 * str_bytes),
            // Flags, TypeName, TypeNamespace, Extends, FieldList
            TableId::TypeDef => Some(
                4 + 2 * str_bytes
                    + self.table_index_bytes(TableId::TypeRef)
                    + self.table_index_bytes(TableId::Field),
            ),
            // RVA, ImplFlags, Flags, Name, Signature, ParamList
            TableId::MethodDef => {
                Some(4 + 2 + 2 + str_bytes + self.blob_index_bytes() + 2)
            }
            _ => None,
        }
    }
}
