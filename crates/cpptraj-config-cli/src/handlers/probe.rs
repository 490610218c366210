//! Probe dependencies without writing anything.

use cpptraj_config_core::{ConfigureError, ProbeReport, default_probes, run_probes};

use super::{enforce_strict, log_compiler};
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_probe_report;

/// Execute the probe command.
pub async fn execute(ctx: &CliContext, strict: bool, json: bool) -> Result<(), CliError> {
    log_compiler(ctx).await;

    let probes = default_probes(&ctx.profile);
    let report =
        match run_probes(&ctx.snapshot, &ctx.profile, ctx.toolchain.as_ref(), &probes).await {
            Ok((_, report)) => report,
            Err(ConfigureError::ProbesAborted(aborted)) => {
                print_partial(&aborted.report, json)?;
                return Err(aborted.into());
            }
            Err(e) => return Err(e.into()),
        };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_probe_report(&report);
    }

    enforce_strict(&report, strict)
}

/// Show what finished before the toolchain gave out.
pub(super) fn print_partial(report: &ProbeReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if !report.results.is_empty() {
        print_probe_report(report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{FakeToolchain, context};

    #[tokio::test]
    async fn test_probe_writes_no_files() {
        let work = tempfile::tempdir().unwrap();
        let ctx = context(work.path(), Vec::new());

        execute(&ctx, true, false).await.unwrap();
        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_strict_probe_fails_on_missing_library() {
        let work = tempfile::tempdir().unwrap();
        let ctx = context(work.path(), vec!["-lmkl"]);

        assert!(execute(&ctx, false, true).await.is_ok());
        let err = execute(&ctx, true, false).await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_hung_compiler_exits_with_toolchain_code() {
        let work = tempfile::tempdir().unwrap();
        let mut ctx = context(work.path(), vec!["-lnetcdf"]);
        ctx.toolchain = std::sync::Arc::new(FakeToolchain {
            missing: vec!["-lnetcdf"],
            hanging: vec!["-lz"],
        });

        let err = execute(&ctx, false, false).await.unwrap_err();
        assert_eq!(err.exit_code(), 71);
        assert!(err.to_string().contains("did not finish"));
    }
}
