//! Synthetic minimal PE/CLI images for end-to-end pipeline tests.
//!
//! The builder lays out a single-section image with the smallest metadata that still
//! exercises the whole decode chain: one `Module`, `TypeRef` and `TypeDef` row to
//! skip over, and caller-defined `MethodDef` rows with their bodies in `.text`.

/// RVA of the `.text` section in every built image.
pub const TEXT_RVA: u32 = 0x2000;
/// File offset of the `.text` section in every built image.
pub const TEXT_RAW_PTR: u32 = 0x200;
/// Virtual (and raw) size of the `.text` section.
pub const TEXT_SIZE: u32 = 0x1000;

/// RVA of the metadata root inside the built image.
const METADATA_RVA: u32 = TEXT_RVA + 0x48;
/// Offset of the `#~` stream, relative to the metadata root.
const TABLES_STREAM_OFFSET: u32 = 0x40;

fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_u64(buf: &mut [u8], offset: usize, value: u64) {
    buf[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

/// Builds a minimal managed PE image byte by byte.
pub struct ImageBuilder {
    pe32_plus: bool,
    section_name: &'static str,
    tables_stream_name: &'static str,
    /// `(rva, body bytes)` per method; an empty body writes nothing into `.text`
    methods: Vec<(u32, Vec<u8>)>,
}

impl ImageBuilder {
    pub fn new() -> Self {
        ImageBuilder {
            pe32_plus: false,
            section_name: ".text",
            tables_stream_name: "#~",
            methods: Vec::new(),
        }
    }

    /// Use the PE32+ optional-header layout.
    pub fn pe32_plus(mut self) -> Self {
        self.pe32_plus = true;
        self
    }

    /// Rename the code section (the decoder requires `.text`).
    pub fn section_name(mut self, name: &'static str) -> Self {
        self.section_name = name;
        self
    }

    /// Rename the tables stream (the decoder requires `#~`).
    pub fn tables_stream_name(mut self, name: &'static str) -> Self {
        self.tables_stream_name = name;
        self
    }

    /// Add a `MethodDef` row with the given RVA, writing `body` at that RVA.
    ///
    /// The metadata occupies the low part of the section; keep body RVAs at
    /// `TEXT_RVA + 0x100` or higher (and past the row arrays for many methods).
    pub fn method(mut self, rva: u32, body: &[u8]) -> Self {
        self.methods.push((rva, body.to_vec()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut image = vec![0u8; (TEXT_RAW_PTR + TEXT_SIZE) as usize];

        // MS-DOS stub: signature plus the pointer to the PE header.
        image[0] = b'M';
        image[1] = b'Z';
        put_u32(&mut image, 0x3C, 0x80);

        // PE signature and COFF file header.
        image[0x80..0x84].copy_from_slice(b"PE\0\0");
        put_u16(&mut image, 0x84, if self.pe32_plus { 0x8664 } else { 0x014C });
        put_u16(&mut image, 0x86, 1); // NumberOfSections

        // Optional header.
        let optional = 0x98;
        let fields_after_magic = if self.pe32_plus {
            put_u16(&mut image, optional, 0x020B);
            110
        } else {
            put_u16(&mut image, optional, 0x010B);
            94
        };

        // Data directories; the CLR runtime header is entry 14.
        let directories = optional + 2 + fields_after_magic;
        put_u32(&mut image, directories + 14 * 8, TEXT_RVA);
        put_u32(&mut image, directories + 14 * 8 + 4, 72);

        // Section table: one section.
        let section = directories + 16 * 8;
        image[section..section + self.section_name.len()]
            .copy_from_slice(self.section_name.as_bytes());
        put_u32(&mut image, section + 8, TEXT_SIZE); // VirtualSize
        put_u32(&mut image, section + 12, TEXT_RVA); // VirtualAddress
        put_u32(&mut image, section + 16, TEXT_SIZE); // SizeOfRawData
        put_u32(&mut image, section + 20, TEXT_RAW_PTR); // PointerToRawData

        // CLR runtime (Cor20) header at the start of the section.
        let cor20 = TEXT_RAW_PTR as usize;
        let metadata_size = TEXT_SIZE - (METADATA_RVA - TEXT_RVA);
        put_u32(&mut image, cor20, 72); // cb
        put_u16(&mut image, cor20 + 4, 2); // MajorRuntimeVersion
        put_u16(&mut image, cor20 + 6, 5); // MinorRuntimeVersion
        put_u32(&mut image, cor20 + 8, METADATA_RVA);
        put_u32(&mut image, cor20 + 12, metadata_size);
        put_u32(&mut image, cor20 + 16, 1); // COMIMAGE_FLAGS_ILONLY

        // Metadata root.
        let root = (TEXT_RAW_PTR + (METADATA_RVA - TEXT_RVA)) as usize;
        image[root..root + 4].copy_from_slice(&[0x42, 0x53, 0x4A, 0x42]); // BSJB
        put_u16(&mut image, root + 4, 1);
        put_u16(&mut image, root + 6, 1);
        put_u32(&mut image, root + 12, 12); // version field length
        image[root + 16..root + 26].copy_from_slice(b"v4.0.30319");
        // flags at root + 28, one stream
        put_u16(&mut image, root + 30, 1);

        // The single stream header; the name field is NUL padded to 4 bytes.
        let stream_header = root + 32;
        put_u32(&mut image, stream_header, TABLES_STREAM_OFFSET);
        put_u32(&mut image, stream_header + 4, metadata_size - TABLES_STREAM_OFFSET);
        image[stream_header + 8..stream_header + 8 + self.tables_stream_name.len()]
            .copy_from_slice(self.tables_stream_name.as_bytes());

        // Tables stream: header, row counts, then the row arrays.
        let tables = root + TABLES_STREAM_OFFSET as usize;
        put_u16(&mut image, tables + 4, 2); // MajorVersion 2, MinorVersion 0
        image[tables + 7] = 1; // Reserved
        let valid: u64 = 1 << 0x00 | 1 << 0x01 | 1 << 0x02 | 1 << 0x06;
        put_u64(&mut image, tables + 8, valid);
        put_u32(&mut image, tables + 24, 1); // Module rows
        put_u32(&mut image, tables + 28, 1); // TypeRef rows
        put_u32(&mut image, tables + 32, 1); // TypeDef rows
        put_u32(&mut image, tables + 36, self.methods.len() as u32);

        // Narrow heaps throughout: Module 10 bytes, TypeRef 6, TypeDef 14 (the
        // TypeRef bit widens its Extends column to 4), MethodDef 14 per row.
        let mut row = tables + 40 + 10 + 6 + 14;
        for (rva, _) in &self.methods {
            put_u32(&mut image, row, *rva);
            row += 14;
        }

        // Method bodies into the code section.
        for (rva, body) in &self.methods {
            if body.is_empty() {
                continue;
            }
            let offset = (rva - TEXT_RVA + TEXT_RAW_PTR) as usize;
            image[offset..offset + body.len()].copy_from_slice(body);
        }

        image
    }
}

/// A tiny-format body: 1-byte header declaring `il.len()` code bytes.
pub fn tiny_body(il: &[u8]) -> Vec<u8> {
    assert!(il.len() < 64, "tiny bodies hold at most 63 bytes");

    let mut body = vec![(il.len() as u8) << 2 | 0x02];
    body.extend_from_slice(il);
    body
}

/// A fat-format body: 12-byte header followed by the IL bytes.
pub fn fat_body(il: &[u8]) -> Vec<u8> {
    let mut body = vec![0u8; 12];
    body[0] = 0x03; // fat flags
    body[1] = 0x30; // header size 3 * 4
    put_u16(&mut body, 2, 8); // max_stack
    put_u32(&mut body, 4, il.len() as u32);
    body.extend_from_slice(il);
    body
}
