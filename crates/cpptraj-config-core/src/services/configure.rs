//! The sequential configure pipeline.
//!
//! resolve environment -> prepare workspace -> render config -> probe
//!
//! The first three steps are fatal on error. Probing reports per-library
//! outcomes and only fails when the toolchain itself is unusable; that error
//! still carries the outcomes gathered before it.

use std::path::PathBuf;

use tracing::info;

use crate::environment::{EnvSnapshot, ResolvedEnvironment, log_directory_listing};
use crate::error::{ConfigureError, ProbesAborted};
use crate::platform::PlatformProfile;
use crate::probe::{DependencyProber, ProbeReport, ProbeSpec, ToolchainPort};
use crate::render::{ConfigDocument, render_to_dir};
use crate::workspace::{WORKSPACE_DIRS, prepare_workspace};

/// Inputs for one configure run.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    /// Directory receiving `config.h`, `lib/` and `bin/`.
    pub work_dir: PathBuf,
    /// Probes to run after the configuration is written; empty skips probing.
    pub probes: Vec<ProbeSpec>,
}

/// Everything a configure run produced.
#[derive(Debug, Clone)]
pub struct ConfigureOutcome {
    pub environment: ResolvedEnvironment,
    pub workspace_dirs: Vec<PathBuf>,
    pub config_path: PathBuf,
    pub document: ConfigDocument,
    pub probes: ProbeReport,
}

/// Run the full pipeline against a captured environment.
pub async fn run_configure(
    snapshot: &EnvSnapshot,
    profile: &PlatformProfile,
    toolchain: &dyn ToolchainPort,
    options: &ConfigureOptions,
) -> Result<ConfigureOutcome, ConfigureError> {
    info!("Configuring for {} profile", profile.kind);

    let environment = ResolvedEnvironment::resolve(snapshot, profile)?;
    let workspace_dirs = prepare_workspace(&options.work_dir, &WORKSPACE_DIRS)?;
    let (document, config_path) = render_to_dir(&environment, profile, &options.work_dir)?;

    let probes = if options.probes.is_empty() {
        info!("No dependency probes requested");
        ProbeReport::default()
    } else {
        probe_resolved(&environment, profile, toolchain, &options.probes).await?
    };

    Ok(ConfigureOutcome {
        environment,
        workspace_dirs,
        config_path,
        document,
        probes,
    })
}

/// Resolve the environment and run the probes without writing anything.
pub async fn run_probes(
    snapshot: &EnvSnapshot,
    profile: &PlatformProfile,
    toolchain: &dyn ToolchainPort,
    probes: &[ProbeSpec],
) -> Result<(ResolvedEnvironment, ProbeReport), ConfigureError> {
    let environment = ResolvedEnvironment::resolve(snapshot, profile)?;
    let report = probe_resolved(&environment, profile, toolchain, probes).await?;
    Ok((environment, report))
}

async fn probe_resolved(
    environment: &ResolvedEnvironment,
    profile: &PlatformProfile,
    toolchain: &dyn ToolchainPort,
    probes: &[ProbeSpec],
) -> Result<ProbeReport, ProbesAborted> {
    log_directory_listing("include_dir", &environment.include_dir);
    log_directory_listing("lib_dir", &environment.lib_dir);
    DependencyProber::new(toolchain, environment, profile)
        .probe_all(probes)
        .await
}
