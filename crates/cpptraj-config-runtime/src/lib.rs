//! Process runtime for cpptraj-config.
//!
//! Implements the core `ToolchainPort` by spawning the native compiler.

mod toolchain;
mod version;

pub use toolchain::{DEFAULT_PROBE_TIMEOUT, ProcessToolchain};
pub use version::{compiler_version, parse_version_line};
