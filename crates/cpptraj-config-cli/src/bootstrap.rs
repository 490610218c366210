//! CLI bootstrap - the composition root.
//!
//! The only place where the live environment is captured and the process
//! toolchain is constructed. Handlers receive a `CliContext` and never read
//! `std::env` themselves.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cpptraj_config_core::{
    ConfigurationError, EnvSnapshot, PlatformKind, PlatformProfile, ToolchainPort,
};
use cpptraj_config_runtime::ProcessToolchain;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Copy)]
pub struct CliConfig {
    pub platform: PlatformKind,
    pub probe_timeout: Duration,
}

impl CliConfig {
    /// Apply command-line overrides on top of host defaults.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            platform: cli.profile.unwrap_or_else(PlatformKind::host),
            probe_timeout: Duration::from_secs(cli.probe_timeout),
        }
    }
}

/// Everything a command handler needs.
pub struct CliContext {
    pub snapshot: EnvSnapshot,
    pub profile: PlatformProfile,
    pub toolchain: Arc<dyn ToolchainPort>,
    /// Where `config.h`, `lib/` and `bin/` are created.
    pub work_dir: PathBuf,
}

impl CliContext {
    /// Assemble a context from parts; tests use this with a fake toolchain.
    pub fn new(
        snapshot: EnvSnapshot,
        profile: PlatformProfile,
        toolchain: Arc<dyn ToolchainPort>,
    ) -> Result<Self, CliError> {
        let work_dir = snapshot
            .current_dir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ConfigurationError::CurrentDir("not available".to_string()))?;

        Ok(Self {
            snapshot,
            profile,
            toolchain,
            work_dir,
        })
    }
}

/// Capture the process environment and wire up the real toolchain.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    debug!(
        "Bootstrapping {} profile, probe timeout {:?}",
        config.platform, config.probe_timeout
    );

    CliContext::new(
        EnvSnapshot::capture(),
        config.platform.profile(),
        Arc::new(ProcessToolchain::new(config.probe_timeout)),
    )
}
