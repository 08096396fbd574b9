//! The decode pipeline driver.
//!
//! [`Assembly`] runs the whole sequence once, at construction time: PE headers,
//! CLR runtime header, metadata root, `#~` stream, tables header, row skipping,
//! `MethodDef` list. Afterwards it answers IL queries against the immutable buffer.
//!
//! The cursor never backtracks inside the metadata; the only jumps are the two
//! RVA-driven ones (to the CLR header and to the metadata root), both resolved
//! through the section table.

use std::path::Path;

use rayon::prelude::*;

use crate::{
    file::File,
    metadata::{
        cor20header::Cor20Header,
        method::{FatCodeOffset, MethodBody},
        root::Root,
        streams::{TablesHeader, TABLES_STREAM_NAME},
        tables::{MethodDefRaw, TableId},
    },
    Parser, Result, SectionHeader,
};

/// Name of the section that holds method bodies.
const CODE_SECTION_NAME: &str = ".text";

/// A parsed managed assembly, reduced to what IL extraction needs.
///
/// `Assembly` is the main entry point of this library. Construction performs the
/// entire metadata decode; the accessors and IL queries afterwards are cheap and
/// borrow from the loaded image.
///
/// # Examples
///
/// ```rust,no_run
/// use cildump::Assembly;
/// use std::path::Path;
///
/// let assembly = Assembly::from_file(Path::new("HelloWorld.dll"))?;
/// println!("metadata version {}", assembly.root().version);
///
/// for method in assembly.methods() {
///     let il = assembly.method_il(method)?;
///     println!("{:4} bytes of IL", il.len());
/// }
/// # Ok::<(), cildump::Error>(())
/// ```
pub struct Assembly {
    /// The loaded PE image
    file: File,
    /// CLR runtime header
    cor20: Cor20Header,
    /// Metadata root and stream directory
    root: Root,
    /// Parsed `#~` stream header
    tables: TablesHeader,
    /// `MethodDef` rows in table (= token) order
    methods: Vec<MethodDefRaw>,
    /// Slicing behavior for fat method headers
    fat_code_offset: FatCodeOffset,
}

impl Assembly {
    /// Loads an assembly from a file on disk.
    ///
    /// # Arguments
    /// * `path` - Path of the PE file to load
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not a managed PE, or its
    /// metadata is malformed.
    pub fn from_file(path: &Path) -> Result<Assembly> {
        Self::from_parts(File::from_file(path)?)
    }

    /// Loads an assembly from an in-memory image.
    ///
    /// # Arguments
    /// * `data` - The complete image bytes
    ///
    /// # Errors
    /// Returns an error if the buffer is empty, not a managed PE, or its metadata
    /// is malformed.
    pub fn from_mem(data: Vec<u8>) -> Result<Assembly> {
        Self::from_parts(File::from_mem(data)?)
    }

    /// Run the sequential metadata decode over a loaded image.
    fn from_parts(file: File) -> Result<Assembly> {
        let (clr_rva, _clr_size) = file.clr();
        if clr_rva == 0 {
            // A PE without a CLR directory is a native image, not a broken one.
            return Err(crate::Error::NotSupported);
        }

        let clr_offset = file.rva_to_offset(clr_rva)?;
        let cor20 = Cor20Header::read(file.data_slice(clr_offset, Cor20Header::SIZE)?)?;

        let root_offset = file.rva_to_offset(cor20.meta_data_rva)?;
        let root_data = file.data_slice(root_offset, cor20.meta_data_size as usize)?;
        let root = Root::read(root_data)?;

        let tables_stream = root.stream_by_name(TABLES_STREAM_NAME).ok_or_else(|| {
            malformed_error!("Invalid file structure: {} stream missing", TABLES_STREAM_NAME)
        })?;
        let tables_data =
            &root_data[tables_stream.offset as usize..(tables_stream.offset + tables_stream.size) as usize];
        let tables = TablesHeader::from(tables_data)?;

        // Walk the row arrays: skip everything in front of MethodDef, then read it.
        let mut parser = Parser::new(tables_data);
        parser.seek(tables.rows_offset())?;
        for id in [TableId::Module, TableId::TypeRef, TableId::TypeDef] {
            let row_count = tables.row_count(id);
            if row_count == 0 {
                continue;
            }

            let row_width = tables
                .row_width(id)
                .ok_or_else(|| malformed_error!("Row width unknown for table {:?}", id))?;
            parser.advance_by(row_width * row_count as usize)?;
        }
        let methods = MethodDefRaw::read_table(&mut parser, &tables)?;

        Ok(Assembly {
            file,
            cor20,
            root,
            tables,
            methods,
            fat_code_offset: FatCodeOffset::default(),
        })
    }

    /// The loaded PE image.
    #[must_use]
    pub fn file(&self) -> &File {
        &self.file
    }

    /// The CLR runtime header.
    #[must_use]
    pub fn cor20(&self) -> &Cor20Header {
        &self.cor20
    }

    /// The metadata root and stream directory.
    #[must_use]
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// The parsed `#~` tables-stream header.
    #[must_use]
    pub fn tables(&self) -> &TablesHeader {
        &self.tables
    }

    /// All `MethodDef` rows, in table (= metadata token) order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDefRaw] {
        &self.methods
    }

    /// The slicing behavior used for fat method headers.
    #[must_use]
    pub fn fat_code_offset(&self) -> FatCodeOffset {
        self.fat_code_offset
    }

    /// Set the slicing behavior for fat method headers.
    ///
    /// # Arguments
    /// * `fat_code_offset` - See [`FatCodeOffset`]
    pub fn set_fat_code_offset(&mut self, fat_code_offset: FatCodeOffset) {
        self.fat_code_offset = fat_code_offset;
    }

    /// File offset of a method's body header.
    ///
    /// Bodies live in the code section; a method RVA outside its virtual range is a
    /// decode failure.
    fn body_offset(&self, method: &MethodDefRaw) -> Result<usize> {
        let section = self
            .file
            .section_by_name(CODE_SECTION_NAME)
            .ok_or_else(|| malformed_error!("Code section {} is missing", CODE_SECTION_NAME))?;

        if !section.contains(method.rva) {
            return Err(malformed_error!(
                "Method RVA {:#x} is not mapped by the {} section",
                method.rva,
                CODE_SECTION_NAME
            ));
        }

        Ok((method.rva - section.virtual_address) as usize
            + section.pointer_to_raw_data as usize)
    }

    /// Decode the body header of a method.
    ///
    /// # Arguments
    /// * `method` - A row from [`Assembly::methods`]
    ///
    /// # Errors
    /// Returns an error for methods without a body (RVA 0), for RVAs outside the
    /// code section, and for unrecognized header formats.
    pub fn method_body(&self, method: &MethodDefRaw) -> Result<MethodBody> {
        if method.rva == 0 {
            return Err(malformed_error!(
                "Method {} has no body (RVA is zero)",
                method.rid
            ));
        }

        let offset = self.body_offset(method)?;
        let data = self.file.data();
        if offset >= data.len() {
            return Err(out_of_bounds_error!());
        }

        MethodBody::from(&data[offset..])
    }

    /// The raw IL bytes of a method.
    ///
    /// Methods without a body (RVA 0: abstract, extern) yield an empty slice; the
    /// output stays one entry per `MethodDef` row.
    ///
    /// # Arguments
    /// * `method` - A row from [`Assembly::methods`]
    ///
    /// # Errors
    /// Returns an error for RVAs outside the code section, unrecognized header
    /// formats, or code ranges exceeding the image.
    pub fn method_il(&self, method: &MethodDefRaw) -> Result<&[u8]> {
        if method.rva == 0 {
            return Ok(&[]);
        }

        let offset = self.body_offset(method)?;
        let data = self.file.data();
        if offset >= data.len() {
            return Err(out_of_bounds_error!());
        }

        let body = MethodBody::from(&data[offset..])?;
        let code_start = offset + body.code_offset(self.fat_code_offset);
        self.file.data_slice(code_start, body.size_code)
    }

    /// The IL bytes of every method, in `MethodDef` table order.
    ///
    /// Each extraction is a pure function of the immutable buffer and the section
    /// table, so the methods are processed in parallel; the result preserves table
    /// order.
    ///
    /// # Errors
    /// Returns an extraction error if any method fails to decode.
    pub fn all_method_il(&self) -> Result<Vec<&[u8]>> {
        self.methods
            .par_iter()
            .map(|method| self.method_il(method))
            .collect()
    }

    /// The sections of the underlying PE image.
    #[must_use]
    pub fn sections(&self) -> &[SectionHeader] {
        self.file.sections()
    }
}
