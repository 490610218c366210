//! Dependency Prober: one trial compilation per `ProbeSpec`.
//!
//! Probing is exhaustive. A library that fails to compile or link is
//! recorded and the next probe still runs; only a toolchain that cannot be
//! used at all ends the run early.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tempfile::TempDir;
use tracing::{debug, info, warn};

use super::port::{ToolInvocation, ToolOutput, ToolchainPort};
use super::sources::builtin_source;
use super::spec::{ProbeReport, ProbeResult, ProbeSpec};
use crate::environment::ResolvedEnvironment;
use crate::error::{ProbesAborted, ToolchainError};
use crate::platform::PlatformProfile;

/// Runs trial compilations against the resolved include and library paths.
pub struct DependencyProber<'a> {
    toolchain: &'a dyn ToolchainPort,
    env: &'a ResolvedEnvironment,
    profile: &'a PlatformProfile,
}

impl<'a> DependencyProber<'a> {
    pub fn new(
        toolchain: &'a dyn ToolchainPort,
        env: &'a ResolvedEnvironment,
        profile: &'a PlatformProfile,
    ) -> Self {
        Self {
            toolchain,
            env,
            profile,
        }
    }

    /// Run every probe in order and collect the outcomes.
    ///
    /// Trial sources and executables live in a scratch directory that is
    /// removed when this returns.
    pub async fn probe_all(&self, specs: &[ProbeSpec]) -> Result<ProbeReport, ProbesAborted> {
        let mut report = ProbeReport::default();

        let scratch = match tempfile::Builder::new().prefix("cpptraj-probe-").tempdir() {
            Ok(scratch) => scratch,
            Err(e) => {
                let error = ToolchainError::TrialSource {
                    path: std::env::temp_dir(),
                    reason: format!("cannot create scratch directory: {e}"),
                };
                return Err(ProbesAborted { report, error });
            }
        };

        for spec in specs {
            let result = match self.probe(spec, &scratch).await {
                Ok(result) => result,
                Err(error) => {
                    warn!(
                        "Probing stopped at {} after {} result(s): {error}",
                        spec.library,
                        report.results.len()
                    );
                    return Err(ProbesAborted { report, error });
                }
            };
            if result.success {
                info!("Probe {} passed ({:?})", result.library, result.elapsed);
            } else {
                warn!("Probe {} failed: {}", result.library, result.command);
                debug!("{}", result.diagnostic);
            }
            report.results.push(result);
        }

        info!(
            "Dependency probes: {}/{} passed",
            report.passed_count(),
            report.results.len()
        );
        Ok(report)
    }

    async fn probe(&self, spec: &ProbeSpec, scratch: &TempDir) -> Result<ProbeResult, ToolchainError> {
        let source = self.trial_source_path(spec, scratch.path())?;
        let invocation = self.invocation(spec, &source, scratch.path());
        let command = invocation.command_line();
        debug!("Probing {}: {command}", spec.library);

        let started = Instant::now();
        let output = self.toolchain.invoke(&invocation).await?;
        let elapsed = started.elapsed();

        Ok(ProbeResult {
            library: spec.library.clone(),
            command,
            success: output.success,
            diagnostic: diagnostic_text(&invocation, &output),
            elapsed,
        })
    }

    /// Build the compiler invocation for one probe.
    ///
    /// Link flags come after the source so linkers that resolve symbols
    /// left to right still see the references first.
    pub fn invocation(&self, spec: &ProbeSpec, source: &Path, scratch: &Path) -> ToolInvocation {
        let output = scratch.join(format!("{}{}", spec.output_stem(), self.profile.exe_suffix));

        let mut args = vec![
            format!("-I{}", self.env.include_dir),
            source.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
            format!("-L{}", self.env.lib_dir),
        ];
        args.extend(spec.link_flag.split_whitespace().map(str::to_string));

        ToolInvocation {
            program: self.profile.cxx.to_string(),
            args,
            working_dir: scratch.to_path_buf(),
        }
    }

    /// Prefer the recipe's own trial source; otherwise write the built-in one.
    fn trial_source_path(&self, spec: &ProbeSpec, scratch: &Path) -> Result<PathBuf, ToolchainError> {
        let recipe_source = Path::new(&self.env.recipe_dir).join(&spec.trial_source);
        if recipe_source.is_file() {
            debug!("Using recipe trial source {}", recipe_source.display());
            return Ok(recipe_source);
        }

        let program = builtin_source(&spec.trial_source).ok_or_else(|| {
            ToolchainError::TrialSource {
                path: recipe_source.clone(),
                reason: "not found and no built-in program for this name".to_string(),
            }
        })?;

        let generated = scratch.join(&spec.trial_source);
        fs::write(&generated, program).map_err(|e| ToolchainError::TrialSource {
            path: generated.clone(),
            reason: e.to_string(),
        })?;
        debug!("Generated trial source {}", generated.display());
        Ok(generated)
    }
}

fn diagnostic_text(invocation: &ToolInvocation, output: &ToolOutput) -> String {
    let text = output.combined();
    if output.success || !text.is_empty() {
        return text;
    }
    match output.exit_code {
        Some(code) => format!("{} exited with status {code}", invocation.program),
        None => format!("{} was terminated by a signal", invocation.program),
    }
}
