//! Report options and their on-disk form.
//!
//! Options only steer rendering; the tree transformation never reads them.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Rendering options for the HTML report.
///
/// Can be stored as YAML or JSON, e.g.
///
/// ```yaml
/// name: Smith
/// family_inline: true
/// family_section: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Family name shown in the report title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Show each person's families inside their own entry.
    pub family_inline: bool,
    /// Emit a separate section listing every family.
    pub family_section: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { name: None, family_inline: false, family_section: true }
    }
}

impl ReportOptions {
    pub fn with_name(mut self, name: Option<String>) -> Self {
        if name.is_some() {
            self.name = name;
        }
        self
    }

    /// Report title, e.g. `Smith Family Tree`, or `Family Tree` without a name.
    pub fn title(&self) -> String {
        format!("{} Family Tree", self.name.as_deref().unwrap_or_default()).trim_start().to_string()
    }
}

/// Load report options from a `.yaml`/`.yml` or `.json` file.
pub fn load_report_options(path: &Path) -> Result<ReportOptions> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let options = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&body)
            .with_context(|| format!("Failed to parse report config YAML {}", path.display()))?,
        "json" => serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse report config JSON {}", path.display()))?,
        other => {
            return Err(anyhow!(
                "Unsupported report config format '{}' for {} (expected yaml, yml or json)",
                other,
                path.display()
            ));
        }
    };
    Ok(options)
}
