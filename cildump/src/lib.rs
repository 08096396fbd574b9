// Copyright 2025 the cildump authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![allow(dead_code)]

//! # cildump
//!
//! Extract the raw IL bytecode of every method defined in a managed (.NET/CLI) PE
//! executable. `cildump` is a byte-format decoder, not an interpreter: it locates and
//! slices the bytes that constitute each method body, and never executes or
//! disassembles IL.
//!
//! ## What it does
//!
//! The decode pipeline walks, in order:
//!
//! 1. The PE headers (MS-DOS stub, COFF file header, optional header, section table)
//! 2. The CLR runtime header and the metadata root it points to
//! 3. The metadata stream directory, down to the `#~` tables stream
//! 4. The tables-stream header and the row arrays of the `Module`, `TypeRef` and
//!    `TypeDef` tables (skipped by width arithmetic, never materialized)
//! 5. The `MethodDef` table, capturing each method's RVA
//! 6. Each method-body header (tiny or fat), yielding the IL byte range
//!
//! Every step is plain cumulative byte-offset bookkeeping over an immutable buffer;
//! the only jumps are the two RVA-driven ones (CLR header, metadata root).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cildump::Assembly;
//! use std::path::Path;
//!
//! let assembly = Assembly::from_file(Path::new("HelloWorld.dll"))?;
//! for (method, il) in assembly.methods().iter().zip(assembly.all_method_il()?) {
//!     println!("method {:#010x}: {} IL bytes", method.rid, il.len());
//! }
//! # Ok::<(), cildump::Error>(())
//! ```
//!
//! ## Scope
//!
//! Only the minimum table chain required to enumerate method RVAs is decoded
//! (`Module`, `TypeRef`, `TypeDef`, `MethodDef`). Heap contents, signatures, and all
//! other tables are never touched; the `#-` stream variant is not handled. Method
//! bodies are returned as raw byte slices borrowed from the input buffer.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Failures are deterministic
//! (the input is a static buffer) and fatal: there is no partial-result mode.
//!
//! ## Reference
//!
//! - [ECMA-335 Standard](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf) - Partition II, metadata and file format

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;
pub mod metadata;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use cildump::prelude::*;
///
/// let assembly = Assembly::from_file("HelloWorld.dll".as_ref())?;
/// println!("{} methods", assembly.methods().len());
/// # Ok::<(), cildump::Error>(())
/// ```
pub mod prelude {
    pub use crate::{
        metadata::{
            assembly::Assembly,
            cor20header::Cor20Header,
            method::{FatCodeOffset, MethodBody},
            root::Root,
            streams::{StreamHeader, TablesHeader},
            tables::{MethodDefRaw, TableId},
        },
        Error, File, Parser, Result, SectionHeader,
    };
}

pub use error::Error;
pub use file::{parser::Parser, File, SectionHeader};
pub use metadata::{
    assembly::Assembly,
    method::{FatCodeOffset, MethodBody},
    streams::{StreamHeader, TablesHeader},
    tables::{MethodDefRaw, TableId},
};

/// Result type used throughout this library.
pub type Result<T> = std::result::Result<T, Error>;
