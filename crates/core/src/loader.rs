use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::gedcom::load_gedcom;
use crate::raw::RecordGraph;
use crate::tree::{FamilyTreeBuilder, TreeBuild};

/// Load and validate a record graph from disk.
///
/// `.json` files hold an already-parsed record graph; everything else is read
/// as GEDCOM text.
pub fn load_record_graph(path: &Path) -> Result<RecordGraph> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let graph = if ext.eq_ignore_ascii_case("json") {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read record graph {}", path.display()))?;
        RecordGraph::from_json_str(&body)
    } else {
        RecordGraph::from_value(&load_gedcom(path)?)
    };
    graph.with_context(|| format!("Invalid record graph in {}", path.display()))
}

/// Load `path` and run the full tree build over it.
pub fn load_family_tree(path: &Path) -> Result<TreeBuild> {
    let graph = load_record_graph(path)?;
    let build = FamilyTreeBuilder::new(&graph)
        .build()
        .with_context(|| format!("Failed to build family tree from {}", path.display()))?;
    log::info!(
        "built {} individuals and {} families from {}",
        build.tree.individuals.len(),
        build.tree.families.len(),
        path.display()
    );
    Ok(build)
}
