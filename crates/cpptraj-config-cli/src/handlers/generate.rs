//! Generate config.h and probe dependencies.

use cpptraj_config_core::{
    ConfigureError, ConfigureOptions, ResolvedEnvironment, default_probes, render, run_configure,
};
use tracing::info;

use super::probe::print_partial;
use super::{enforce_strict, log_compiler};
use crate::bootstrap::CliContext;
use crate::commands::GenerateArgs;
use crate::error::CliError;
use crate::presentation::print_probe_report;

/// Execute the generate command.
pub async fn execute(ctx: &CliContext, args: &GenerateArgs) -> Result<(), CliError> {
    if args.dry_run {
        let env = ResolvedEnvironment::resolve(&ctx.snapshot, &ctx.profile)?;
        print!("{}", render(&env, &ctx.profile)?);
        return Ok(());
    }

    let probes = if args.skip_probes {
        Vec::new()
    } else {
        log_compiler(ctx).await;
        default_probes(&ctx.profile)
    };
    let options = ConfigureOptions {
        work_dir: ctx.work_dir.clone(),
        probes,
    };

    let outcome = match run_configure(
        &ctx.snapshot,
        &ctx.profile,
        ctx.toolchain.as_ref(),
        &options,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(ConfigureError::ProbesAborted(aborted)) => {
            print_partial(&aborted.report, false)?;
            return Err(aborted.into());
        }
        Err(e) => return Err(e.into()),
    };

    info!("Wrote {}", outcome.config_path.display());
    println!("Wrote {}", outcome.config_path.display());

    if !outcome.probes.results.is_empty() {
        print_probe_report(&outcome.probes);
    }

    enforce_strict(&outcome.probes, args.strict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{FakeToolchain, context};

    #[tokio::test]
    async fn test_generate_writes_config_and_dirs() {
        let work = tempfile::tempdir().unwrap();
        let ctx = context(work.path(), Vec::new());

        execute(&ctx, &GenerateArgs::default()).await.unwrap();

        let config = std::fs::read_to_string(work.path().join("config.h")).unwrap();
        assert!(config.contains("LDFLAGS=-L/opt/lib -lnetcdf -lz xdrfile/libxdrfile.a"));
        assert!(work.path().join("lib").is_dir());
        assert!(work.path().join("bin").is_dir());
    }

    #[tokio::test]
    async fn test_dry_run_touches_nothing() {
        let work = tempfile::tempdir().unwrap();
        let ctx = context(work.path(), Vec::new());
        let args = GenerateArgs {
            dry_run: true,
            ..GenerateArgs::default()
        };

        execute(&ctx, &args).await.unwrap();
        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_strict_failure_still_writes_config() {
        let work = tempfile::tempdir().unwrap();
        let ctx = context(work.path(), vec!["-lnetcdf"]);
        let args = GenerateArgs {
            strict: true,
            ..GenerateArgs::default()
        };

        let err = execute(&ctx, &args).await.unwrap_err();
        assert!(matches!(err, CliError::ProbesFailed { failed: 1, total: 3 }));
        assert!(work.path().join("config.h").is_file());
    }

    #[tokio::test]
    async fn test_hung_compiler_after_config_is_written() {
        let work = tempfile::tempdir().unwrap();
        let mut ctx = context(work.path(), Vec::new());
        ctx.toolchain = std::sync::Arc::new(FakeToolchain {
            missing: vec!["-lnetcdf"],
            hanging: vec!["-lmkl"],
        });

        let err = execute(&ctx, &GenerateArgs::default()).await.unwrap_err();
        assert_eq!(err.exit_code(), 71);
        assert!(work.path().join("config.h").is_file());
    }
}
