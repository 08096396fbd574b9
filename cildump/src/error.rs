use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure mode of the decode pipeline is deterministic: the input is a static byte
/// buffer, so a failing parse fails the same way on every run. There is no retry logic and
/// no partial-result mode; errors propagate to the caller and abort the decode.
///
/// # Error Categories
///
/// ## Structural Errors
/// - [`Error::Malformed`] - A required structure is absent or damaged (missing `#~` stream,
///   unmapped RVA, unrecognized method-header format)
/// - [`Error::OutOfBounds`] - A read or skip would exceed the buffer
/// - [`Error::NotSupported`] - Not a managed PE, or an unsupported PE variant
/// - [`Error::Empty`] - Empty input provided
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// # Examples
///
/// ```rust
/// use cildump::{Assembly, Error};
/// use std::path::Path;
///
/// match Assembly::from_file(Path::new("HelloWorld.dll")) {
///     Ok(assembly) => {
///         println!("{} methods", assembly.methods().len());
///     }
///     Err(Error::NotSupported) => {
///         eprintln!("not a managed PE file");
///     }
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(e) => {
///         eprintln!("error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// The file structure does not conform to the PE/CLI format at the point being
    /// decoded. The source location where the malformation was detected is included
    /// for debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    ///
    /// A read or skip would have run past the end of the buffer. This is a safety
    /// check to prevent overruns during parsing; data is never silently truncated.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// The input is not a managed PE executable (no CLR runtime header), or uses a
    /// PE variant this library does not handle.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or mapping the input.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for wrapping failures from external layers (e.g. memory mapping) with
    /// their textual description.
    #[error("{0}")]
    Error(String),
}
