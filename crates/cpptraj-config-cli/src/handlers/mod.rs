//! Command handlers.
//!
//! Each handler takes the composed `CliContext`, delegates the work to
//! core services and prints the result.

pub mod env;
pub mod generate;
pub mod probe;

use cpptraj_config_core::ProbeReport;
use cpptraj_config_runtime::compiler_version;
use tracing::{info, warn};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Log which compiler the probes are about to use.
async fn log_compiler(ctx: &CliContext) {
    match compiler_version(ctx.profile.cxx).await {
        Some(version) => info!("Using {} {version}", ctx.profile.cxx),
        None => warn!("Could not determine {} version", ctx.profile.cxx),
    }
}

/// Under `--strict`, turn any failed probe into an error.
fn enforce_strict(report: &ProbeReport, strict: bool) -> Result<(), CliError> {
    if !strict || report.all_passed() {
        return Ok(());
    }
    Err(CliError::ProbesFailed {
        failed: report.failures().count(),
        total: report.results.len(),
    })
}
