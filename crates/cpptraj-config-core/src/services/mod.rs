//! Orchestration over the individual components.

mod configure;

pub use configure::{ConfigureOptions, ConfigureOutcome, run_configure, run_probes};
