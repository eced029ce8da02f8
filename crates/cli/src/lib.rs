use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

pub mod commands;

/// Resolve a user-supplied path against the current working directory.
///
/// Existing paths are canonicalized; paths that do not exist yet (e.g. an
/// output file) are joined onto the current directory instead.
pub fn canonicalize_or_current(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path == Path::new(".") {
        Ok(env::current_dir().context("Failed to get current directory")?)
    } else {
        match path.canonicalize() {
            Ok(p) => Ok(p),
            Err(_) => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                Ok(cwd.join(path))
            }
        }
    }
}

/// Resolve an input file and make sure it exists.
pub fn resolve_input_file(file: &str) -> Result<PathBuf> {
    let path = canonicalize_or_current(file)?;
    if !path.is_file() {
        return Err(anyhow!("Input file does not exist: {}", path.display()));
    }
    Ok(path)
}

/// Infer a family name from the input file stem (e.g. `smith.ged` -> `smith`).
///
/// Returns `None` when the path has no usable stem.
pub fn infer_tree_name(input: &Path) -> Option<String> {
    input.file_stem().and_then(|s| s.to_str()).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Map `-v` occurrences to a log level filter; `RUST_LOG` still wins.
pub fn log_filter_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialise `env_logger` once for the process.
pub fn init_logging(verbosity: u8) {
    let env = env_logger::Env::default().default_filter_or(log_filter_for(verbosity));
    // A second initialisation (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}
