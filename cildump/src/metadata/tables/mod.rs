//! Metadata table identifiers and row readers.
//!
//! Tables in the `#~` stream are flat arrays of fixed-width rows, where the widths
//! depend on the heap-size flags and the valid mask of the tables header. This
//! decoder walks exactly one chain: it skips over `Module`, `TypeRef` and `TypeDef`
//! by width arithmetic and reads `MethodDef`, keeping nothing but each method's RVA.
//!
//! # Key Components
//!
//! - [`crate::metadata::tables::TableId`] - ECMA-335 table identifiers
//! - [`crate::metadata::tables::MethodDefRaw`] - One `MethodDef` row, reduced to its RVA
//!
//! # Reference
//! - [ECMA-335 Partition II, Section 22](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

mod methoddef;
mod tableid;

pub use methoddef::MethodDefRaw;
pub use tableid::TableId;
