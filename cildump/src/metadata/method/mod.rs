//! Method-body headers of CIL methods.
//!
//! Every method with IL code starts with a 1-byte ("tiny") or 12-byte ("fat") header
//! encoding the code size; the IL bytes follow it. This module decodes those headers
//! and computes where the code begins.
//!
//! # Key Components
//!
//! - [`crate::metadata::method::MethodBody`] - Decoded tiny/fat header
//! - [`crate::metadata::method::FatCodeOffset`] - Where fat-header code is sliced from
//!
//! # Reference
//! - [ECMA-335 II.25.4](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

mod body;

pub use body::{FatCodeOffset, MethodBody, MethodBodyFlags};
