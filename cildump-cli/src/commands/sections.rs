use std::path::Path;

use anyhow::Context;
use cildump::{File, SectionHeader};
use serde::Serialize;

use crate::{app::GlobalOptions, output::print_output};

#[derive(Debug, Serialize)]
struct SectionsOutput {
    sections: Vec<SectionHeader>,
    count: usize,
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    // Sections exist in any PE image, managed or not, so this does not run the
    // metadata decode.
    let file = File::from_file(path)
        .with_context(|| format!("failed to load PE file: {}", path.display()))?;

    let sections = file.sections().to_vec();
    let count = sections.len();
    let output = SectionsOutput { sections, count };

    print_output(&output, opts, |data| {
        println!(
            "{:<10} {:>10} {:>10} {:>10} {:>10}",
            "NAME", "VADDR", "VSIZE", "RAWPTR", "RAWSIZE"
        );
        for section in &data.sections {
            println!(
                "{:<10} {:>#10x} {:>#10x} {:>#10x} {:>#10x}",
                section.name,
                section.virtual_address,
                section.virtual_size,
                section.pointer_to_raw_data,
                section.size_of_raw_data,
            );
        }
        println!("{} sections", data.count);
    })
}
