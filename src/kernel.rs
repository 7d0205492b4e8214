use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

pub const MODULES_ROOT: &str = "/lib/modules";
const OSRELEASE: &str = "/proc/sys/kernel/osrelease";

/// Resolves the kernel module directory from the optional `-k` argument.
///
/// An argument containing `/` is taken as a directory path; a bare value is
/// treated as a kernel release under `/lib/modules`. With no argument the
/// running kernel's directory is detected. The chosen directory must hold a
/// `modules.dep`, otherwise this fails before any loading starts.
pub fn resolve_kernel_dir(arg: Option<&str>) -> Result<PathBuf> {
    let dir = match arg {
        Some(value) if value.contains('/') => PathBuf::from(value),
        Some(value) => Path::new(MODULES_ROOT).join(value),
        None => detect_kernel_dir(Path::new(MODULES_ROOT), Path::new(OSRELEASE))?,
    };
    ensure_module_dir(&dir)?;
    Ok(dir)
}

/// Directory for the running kernel, read from the osrelease file. Bootstrap
/// systems may carry a single module tree under a release that is not the
/// one running; when the release directory is absent and the modules root
/// holds exactly one subdirectory, use that instead.
fn detect_kernel_dir(modules_root: &Path, osrelease: &Path) -> Result<PathBuf> {
    let release = fs::read_to_string(osrelease)
        .with_context(|| format!("failed to read {}", osrelease.display()))?;
    let dir = modules_root.join(release.trim());
    if dir.is_dir() {
        return Ok(dir);
    }

    debug!(missing = %dir.display(), "release directory absent, scanning modules root");
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(modules_root)
        .with_context(|| format!("failed to list {}", modules_root.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            subdirs.push(entry.path());
        }
    }
    match subdirs.as_slice() {
        [only] => Ok(only.clone()),
        _ => Ok(dir),
    }
}

fn ensure_module_dir(dir: &Path) -> Result<()> {
    if !dir.join("modules.dep").is_file() {
        bail!(
            "invalid kernel modules directory {}: modules.dep not found",
            dir.display()
        );
    }
    Ok(())
}
