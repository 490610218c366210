//! # cpptraj-config-core
//!
//! Generates the `config.h` build-variable file for a cpptraj source build
//! and checks that NetCDF, zlib and a BLAS library can actually be linked
//! on the host before the main build starts.
//!
//! Components, in the order the pipeline runs them:
//!
//! - [`environment`] - capture and resolve include/library/recipe paths
//! - [`workspace`] - create the `lib/` and `bin/` output directories
//! - [`render`] - fill the template and write `config.h` atomically
//! - [`probe`] - trial compilations through the [`ToolchainPort`] seam
//!
//! [`services::run_configure`] drives all four.

#![deny(unused_crate_dependencies)]

pub mod environment;
pub mod error;
pub mod platform;
pub mod probe;
pub mod render;
pub mod services;
pub mod workspace;

pub use environment::{EnvSnapshot, PathSource, ResolvedEnvironment};
pub use error::{
    ConfigurationError, ConfigureError, ProbesAborted, RenderError, ToolchainError, WorkspaceError,
};
pub use platform::{PlatformKind, PlatformProfile};
pub use probe::{
    DependencyProber, ProbeReport, ProbeResult, ProbeSpec, ToolInvocation, ToolOutput,
    ToolchainPort, default_probes,
};
pub use render::{CONFIG_FILE_NAME, ConfigDocument, ConfigLine, render, render_to_dir};
pub use services::{ConfigureOptions, ConfigureOutcome, run_configure, run_probes};
pub use workspace::{WORKSPACE_DIRS, prepare_workspace};

