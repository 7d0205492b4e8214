//! Binary-side plumbing around the [`modgraph`] core: CLI surface, kernel
//! directory detection, the loaded-modules source and logging bootstrap.

pub mod cli;
pub mod kernel;
pub mod loaded;
pub mod logger;
