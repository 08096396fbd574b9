use std::path::Path;

use serde::Serialize;

use crate::{app::GlobalOptions, commands::common::load_assembly, output::print_output};

#[derive(Debug, Serialize)]
struct StreamEntry {
    name: String,
    offset: u32,
    size: u32,
}

#[derive(Debug, Serialize)]
struct TableEntry {
    table: String,
    rows: u32,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    version: String,
    streams: Vec<StreamEntry>,
    tables: Vec<TableEntry>,
    methods: usize,
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let assembly = load_assembly(path)?;

    let streams = assembly
        .root()
        .stream_headers
        .iter()
        .map(|stream| StreamEntry {
            name: stream.name.clone(),
            offset: stream.offset,
            size: stream.size,
        })
        .collect();

    let tables = assembly
        .tables()
        .table_summary()
        .into_iter()
        .map(|summary| TableEntry {
            table: format!("{:?}", summary.table_id),
            rows: summary.row_count,
        })
        .collect();

    let output = InfoOutput {
        version: assembly.root().version.clone(),
        streams,
        tables,
        methods: assembly.methods().len(),
    };

    print_output(&output, opts, |data| {
        println!("Metadata version: {}", data.version);

        println!("\nStreams:");
        for stream in &data.streams {
            println!(
                "  {:<10} offset {:>#8x}  size {:>#8x}",
                stream.name, stream.offset, stream.size
            );
        }

        println!("\nTables:");
        for table in &data.tables {
            println!("  {:<24} {:>8} rows", table.table, table.rows);
        }

        println!("\n{} methods", data.methods);
    })
}
