use std::fs;

use anyhow::{Context, Result};
use famtree_core::loader::load_family_tree;

use crate::{canonicalize_or_current, resolve_input_file};

/// Write the transformed family tree as pretty JSON, to `output` or stdout.
pub fn export_json_command(file: &str, output: Option<&str>) -> Result<()> {
    let input = resolve_input_file(file)?;
    let build = load_family_tree(&input)?;
    let serialized = serde_json::to_string_pretty(&build.tree)
        .context("Failed to serialize family tree to JSON")?;

    match output {
        Some(output) => {
            let path = canonicalize_or_current(output)?;
            fs::write(&path, serialized)
                .with_context(|| format!("Failed to write family tree JSON to {}", path.display()))?;
            println!("Exported family tree JSON: {}", path.display());
        }
        None => println!("{}", serialized),
    }

    Ok(())
}
