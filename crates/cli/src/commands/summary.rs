use anyhow::Result;
use famtree_core::loader::load_family_tree;
use famtree_core::tree::Diagnostic;
use serde::Serialize;

use crate::{infer_tree_name, resolve_input_file};

#[derive(Debug, Serialize)]
pub struct TreeSummary {
    pub name: Option<String>,
    pub input: String,
    pub individuals: usize,
    pub families: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collect counts and recoverable problems for an input file.
pub fn tree_summary(file: &str) -> Result<TreeSummary> {
    let input = resolve_input_file(file)?;
    let build = load_family_tree(&input)?;
    Ok(TreeSummary {
        name: infer_tree_name(&input),
        input: input.display().to_string(),
        individuals: build.tree.individuals.len(),
        families: build.tree.families.len(),
        diagnostics: build.diagnostics,
    })
}

pub fn summary_command(file: &str, json: bool) -> Result<()> {
    let summary = tree_summary(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Family tree summary");
    println!("===================");
    println!("Input: {}", summary.input);
    println!("Individuals: {}", summary.individuals);
    println!("Families: {}", summary.families);
    if summary.diagnostics.is_empty() {
        println!("Diagnostics: (none)");
    } else {
        println!("Diagnostics ({}):", summary.diagnostics.len());
        for diagnostic in &summary.diagnostics {
            println!("  - {}", diagnostic);
        }
    }

    Ok(())
}
