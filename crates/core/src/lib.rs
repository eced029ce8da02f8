//! famtree-core
//!
//! Core library turning a GEDCOM genealogy file into a normalized family tree
//! and a static HTML report.
//!
//! This crate defines the typed ingestion schema for parsed GEDCOM record
//! graphs (raw), the derived entities (model), the tree transformation
//! (tree), a small GEDCOM reader (gedcom), report options (config) and
//! the HTML renderer (render).
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends.

pub mod config;
pub mod error;
pub mod gedcom;
pub mod loader;
pub mod model;
pub mod raw;
pub mod render;
pub mod tree;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
