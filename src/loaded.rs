use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub const PROC_MODULES: &str = "/proc/modules";

/// Names of the currently loaded modules, in kernel order: the first
/// whitespace-delimited token of each `/proc/modules` record.
pub fn loaded_modules(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_loaded(&text))
}

fn parse_loaded(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
