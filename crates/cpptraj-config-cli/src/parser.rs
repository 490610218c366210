//! Main CLI parser and top-level argument handling.

use clap::Parser;
use cpptraj_config_core::PlatformKind;
use cpptraj_config_runtime::DEFAULT_PROBE_TIMEOUT;

use crate::commands::Commands;

/// Generate `config.h` for a cpptraj build and check that its native
/// dependencies can be linked.
#[derive(Parser, Debug)]
#[command(name = "cpptraj-config")]
#[command(about = "Generate cpptraj build configuration and probe native dependencies")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Target platform profile (posix or windows); defaults to the host
    #[arg(long, global = true, env = "CPPTRAJ_CONFIG_PROFILE")]
    pub profile: Option<PlatformKind>,

    /// Seconds a single trial compilation may run before it is killed
    #[arg(
        long = "probe-timeout",
        global = true,
        env = "CPPTRAJ_CONFIG_PROBE_TIMEOUT",
        default_value_t = DEFAULT_PROBE_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub probe_timeout: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run; `generate` with default flags when omitted.
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Generate(crate::commands::GenerateArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GenerateArgs;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_generate() {
        let cli = Cli::parse_from(["cpptraj-config"]);
        assert_eq!(cli.command_or_default(), Commands::Generate(GenerateArgs::default()));
        assert_eq!(cli.probe_timeout, 120);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "cpptraj-config",
            "probe",
            "--strict",
            "--profile",
            "windows",
            "--probe-timeout",
            "30",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.profile, Some(PlatformKind::Windows));
        assert_eq!(cli.probe_timeout, 30);
        assert_eq!(
            cli.command,
            Some(Commands::Probe {
                strict: true,
                json: false
            })
        );
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::parse_from(["cpptraj-config", "generate", "--dry-run", "--skip-probes"]);
        assert_eq!(
            cli.command,
            Some(Commands::Generate(GenerateArgs {
                dry_run: true,
                skip_probes: true,
                strict: false,
            }))
        );
    }

    #[test]
    fn test_rejects_unknown_profile_and_zero_timeout() {
        assert!(Cli::try_parse_from(["cpptraj-config", "--profile", "beos"]).is_err());
        assert!(Cli::try_parse_from(["cpptraj-config", "--probe-timeout", "0"]).is_err());
    }
}
