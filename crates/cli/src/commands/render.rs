use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use famtree_core::config::{load_report_options, ReportOptions};
use famtree_core::loader::load_family_tree;
use famtree_core::render::render_html;

use crate::{canonicalize_or_current, resolve_input_file};

/// Default report file, relative to the current directory.
pub const DEFAULT_OUTPUT: &str = "output.html";

/// Arguments of the `render` command after CLI parsing.
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    pub file: String,
    pub name: Option<String>,
    pub family_inline: bool,
    pub family_section: bool,
    pub config: Option<String>,
    pub output: Option<String>,
}

/// Merge the optional config file with CLI flags. Flags only override when
/// they move away from the defaults.
pub fn resolve_report_options(args: &RenderArgs) -> Result<ReportOptions> {
    let mut options = match &args.config {
        Some(config) => load_report_options(&canonicalize_or_current(config)?)?,
        None => ReportOptions::default(),
    };
    options = options.with_name(args.name.clone());
    if args.family_inline {
        options.family_inline = true;
    }
    if !args.family_section {
        options.family_section = false;
    }
    Ok(options)
}

/// Build the family tree from `args.file` and write the HTML report.
pub fn render_command(args: &RenderArgs) -> Result<PathBuf> {
    let input = resolve_input_file(&args.file)?;
    let options = resolve_report_options(args)?;
    log::debug!("report options: {options:?}");

    let build = load_family_tree(&input)?;
    let html = render_html(&build.tree, &options, Local::now().date_naive());

    let output = canonicalize_or_current(args.output.as_deref().unwrap_or(DEFAULT_OUTPUT))?;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output dir {}", parent.display()))?;
    }
    fs::write(&output, html)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    println!("Rendered family tree report:");
    println!("  Title: {}", options.title());
    println!("  Individuals: {}", build.tree.individuals.len());
    println!("  Families: {}", build.tree.families.len());
    if !build.diagnostics.is_empty() {
        println!("  Diagnostics: {} (see log output)", build.diagnostics.len());
    }
    println!("  Output: {}", output.display());

    Ok(output)
}
