use std::path::Path;

use anyhow::Context;
use cildump::Assembly;

/// Load a .NET assembly and run the metadata decode.
pub fn load_assembly(path: &Path) -> anyhow::Result<Assembly> {
    Assembly::from_file(path)
        .with_context(|| format!("failed to load assembly: {}", path.display()))
}
