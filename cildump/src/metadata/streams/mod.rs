//! Metadata stream headers and the `#~` tables stream.
//!
//! The metadata root lists a small directory of named streams (`#~`, `#Strings`,
//! `#US`, `#GUID`, `#Blob`). This decoder only consumes one of them: the `#~`
//! compressed tables stream, whose header is parsed by
//! [`crate::metadata::streams::TablesHeader`]. The others are carried through the
//! directory untouched.
//!
//! # Reference
//! - [ECMA-335 II.24.2.2 and II.24.2.6](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

mod streamheader;
mod tablesheader;

pub use streamheader::StreamHeader;
pub use tablesheader::{TableSummary, TablesHeader};

/// Name of the compressed tables stream.
pub const TABLES_STREAM_NAME: &str = "#~";
