use modtrim::cli;

fn main() {
    if let Err(e) = cli::run() {
        // Keep failures on stderr; stdout carries only the module list.
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
