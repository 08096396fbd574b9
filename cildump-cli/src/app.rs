use std::path::PathBuf;

use cildump::FatCodeOffset;
use clap::{Parser, Subcommand, ValueEnum};

/// cildump - extract the raw IL bytecode of every method in a .NET assembly
#[derive(Debug, Parser)]
#[command(name = "cildump", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print each method's IL bytes as uppercase hex pairs, one line per MethodDef row.
    Il {
        /// Path to the .NET assembly file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Where the code of fat-header methods is sliced from.
        #[arg(long, value_enum, default_value = "header")]
        fat_code_offset: FatOffsetArg,
    },

    /// Dump the PE section-header list.
    Sections {
        /// Path to the PE file.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Display assembly overview: metadata version, streams, tables, method count.
    Info {
        /// Path to the .NET assembly file.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

/// Command-line selector for [`cildump::FatCodeOffset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FatOffsetArg {
    /// Slice code after the full 12-byte fat header (ECMA-335 layout).
    Header,
    /// Slice code right after the first header byte (legacy extractor behavior).
    Byte,
}

impl From<FatOffsetArg> for FatCodeOffset {
    fn from(arg: FatOffsetArg) -> Self {
        match arg {
            FatOffsetArg::Header => FatCodeOffset::Header,
            FatOffsetArg::Byte => FatCodeOffset::FlagByte,
        }
    }
}
