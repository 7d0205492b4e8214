use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use crate::kernel;
use crate::loaded;
use crate::logger;
use modgraph::{DepMap, expand_seeds, invert, load_usb_modules, resolve};

#[derive(Parser, Debug)]
#[command(
    name = "modtrim",
    version,
    about = "Resolves kernel module dependencies to decide which modules to keep or trim"
)]
pub struct ModtrimCli {
    #[arg(short = 'k', long = "kernel-dir", value_name = "DIR")]
    /// Kernel module directory; a bare kernel release is looked up under
    /// /lib/modules. Defaults to the running kernel's directory.
    kernel_dir: Option<String>,

    #[arg(short = 'l', long = "loaded")]
    /// Replace the seed list with the currently loaded modules.
    loaded: bool,

    #[arg(short = 'u', long = "usb")]
    /// Append modules matched by usb: aliases to the seed list.
    usb: bool,

    #[arg(short = 'f', long = "filenames")]
    /// Print full module file paths instead of canonical names.
    filenames: bool,

    #[arg(short = 'i', long = "invert")]
    /// Print the modules that may be removed instead of those to keep.
    invert: bool,

    #[arg(value_name = "MODULE")]
    /// Module names or glob patterns seeding the resolution.
    seeds: Vec<String>,
}

pub fn run() -> Result<()> {
    logger::init_logging();
    let cli = ModtrimCli::parse();
    let kernel_dir = kernel::resolve_kernel_dir(cli.kernel_dir.as_deref())?;
    let mut stdout = io::stdout().lock();
    run_with(&cli, &kernel_dir, Path::new(loaded::PROC_MODULES), &mut stdout)
}

/// The whole pipeline: load the dependency map, gather seeds, resolve the
/// closure, optionally invert, print. Split from [`run`] so tests can inject
/// the kernel directory, the loaded-modules path and the output sink.
fn run_with(
    cli: &ModtrimCli,
    kernel_dir: &Path,
    proc_modules: &Path,
    out: &mut impl Write,
) -> Result<()> {
    info!(kernel_dir = %kernel_dir.display(), "resolving module dependencies");

    let map = DepMap::load(&kernel_dir.join("modules.dep"))?;
    debug!(entries = map.len(), "loaded dependency map");

    let mut seeds = expand_seeds(&cli.seeds, &map)?;
    if cli.loaded {
        seeds = loaded::loaded_modules(proc_modules)?;
    }
    if cli.usb {
        let usb = load_usb_modules(&kernel_dir.join("modules.alias"))?;
        seeds.extend(usb);
    }
    debug!(seeds = seeds.len(), "gathered seed modules");

    let kept = resolve(&seeds, &map)?;
    let output = if cli.invert { invert(&kept, &map) } else { kept };

    for module in &output {
        if cli.filenames {
            writeln!(out, "{}", kernel_dir.join(module.filename()).display())?;
        } else {
            writeln!(out, "{}", module.name())?;
        }
    }

    Ok(())
}
