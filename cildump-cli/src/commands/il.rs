use std::path::Path;

use cildump::FatCodeOffset;
use serde::Serialize;

use crate::{app::GlobalOptions, commands::common::load_assembly, output::print_output};

#[derive(Debug, Serialize)]
struct IlOutput {
    methods: Vec<String>,
    count: usize,
}

pub fn run(path: &Path, fat_code_offset: FatCodeOffset, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut assembly = load_assembly(path)?;
    assembly.set_fat_code_offset(fat_code_offset);

    log::debug!(
        "{} MethodDef rows, fat code offset mode {:?}",
        assembly.methods().len(),
        fat_code_offset
    );

    let methods: Vec<String> = assembly
        .all_method_il()?
        .into_iter()
        .map(format_il)
        .collect();

    let count = methods.len();
    let output = IlOutput { methods, count };

    print_output(&output, opts, |data| {
        // One line per MethodDef row, in metadata-token order; bodiless methods
        // print an empty line.
        for line in &data.methods {
            println!("{line}");
        }
    })
}

/// Format IL bytes as uppercase hex pairs joined by `-` (e.g. `1F-2A-2A`).
fn format_il(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join("-")
}
