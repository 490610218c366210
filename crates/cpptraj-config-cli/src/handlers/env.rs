//! Show the resolved environment.

use cpptraj_config_core::ResolvedEnvironment;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the env command.
pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let env = ResolvedEnvironment::resolve(&ctx.snapshot, &ctx.profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&env)?);
    } else {
        println!("profile = {}", ctx.profile.kind);
        println!("{env}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::context;

    #[test]
    fn test_env_resolves_from_snapshot() {
        let work = tempfile::tempdir().unwrap();
        let ctx = context(work.path(), Vec::new());
        assert!(execute(&ctx, false).is_ok());
        assert!(execute(&ctx, true).is_ok());
    }

    #[test]
    fn test_env_reports_unresolved_paths() {
        let work = tempfile::tempdir().unwrap();
        let mut ctx = context(work.path(), Vec::new());
        ctx.snapshot = cpptraj_config_core::EnvSnapshot::new(work.path());

        let err = execute(&ctx, false).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }
}
