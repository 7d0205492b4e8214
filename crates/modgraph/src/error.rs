use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the databases or resolving module names.
///
/// All of these are terminal: the inputs are static local files, so nothing
/// is retried. Each variant carries enough context (path, line number or
/// offending name) to report to the operator.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: missing `:` separator", path.display())]
    MissingSeparator { path: PathBuf, line: usize },

    #[error("{}:{line}: alias line has fewer than three fields", path.display())]
    MalformedAlias { path: PathBuf, line: usize },

    #[error("duplicate module entry `{name}` in dependency database")]
    DuplicateModule { name: String },

    #[error("unable to resolve module name `{name}`")]
    UnresolvedModule { name: String },

    #[error("invalid glob pattern `{pattern}`")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
