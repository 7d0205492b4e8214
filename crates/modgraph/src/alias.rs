use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::GraphError;

/// Loads the canonical names of modules associated with USB hardware from a
/// `modules.alias` file.
///
/// The database holds lines of `alias <pattern> <module-name>`; a line
/// contributes its module iff the pattern starts with `usb:`. Comment lines
/// (`#`) and blank lines are skipped. The name field is already canonical,
/// so no suffix stripping happens here. The result is independent of the
/// dependency map; no cross-validation is done.
pub fn load_usb_modules(path: &Path) -> Result<BTreeSet<String>, GraphError> {
    let text = fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_aliases(&text, path)
}

fn parse_aliases(text: &str, path: &Path) -> Result<BTreeSet<String>, GraphError> {
    let mut modules = BTreeSet::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(_tag), Some(pattern), Some(module)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(GraphError::MalformedAlias {
                path: path.to_path_buf(),
                line: idx + 1,
            });
        };
        if pattern.starts_with("usb:") {
            modules.insert(module.to_string());
        }
    }
    Ok(modules)
}
