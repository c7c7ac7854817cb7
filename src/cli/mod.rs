//! Command Line Interface (CLI) layer for s2mosaic.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that loads the catalog and AOI, builds
//! the composite, and exports it. It wires user-provided options to the underlying
//! library functionality exposed via `s2mosaic::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
