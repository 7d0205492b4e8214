use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. Diagnostics go to stderr so that
/// stdout carries only the module list; verbosity is controlled through
/// `RUST_LOG`, defaulting to warnings.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
