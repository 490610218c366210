//! Dependency probing through trial compilations.
//!
//! # Design
//!
//! - `ProbeSpec` describes one check, `ProbeResult` records its outcome
//! - `ToolchainPort` abstracts the compiler so probing is testable without one
//! - A failed probe is data; only `ToolchainError` stops a run, and the
//!   probes finished before it are returned with the error

mod port;
mod prober;
mod sources;
mod spec;

pub use port::{ToolInvocation, ToolOutput, ToolchainPort};
pub use prober::DependencyProber;
pub use sources::{
    COMPRESSION_SOURCE, COMPRESSION_TRIAL, LINALG_SOURCE, LINALG_TRIAL, NETCDF_SOURCE,
    NETCDF_TRIAL, builtin_source,
};
pub use spec::{ProbeReport, ProbeResult, ProbeSpec, default_probes};
