//! Core dependency-graph logic for trimming kernel modules.
//!
//! Parses the `modules.dep` and `modules.alias` databases produced by
//! `depmod`, resolves a seed list of module names to its full transitive
//! closure, and optionally computes the complement against every known
//! module. Pure in-memory computation once the databases are loaded; the
//! crate knows nothing about the CLI or the running system.

pub mod alias;
pub mod depmap;
pub mod error;
pub mod name;
pub mod resolve;

pub use alias::load_usb_modules;
pub use depmap::DepMap;
pub use error::GraphError;
pub use name::ModuleName;
pub use resolve::{expand_seeds, invert, resolve, resolve_key};
