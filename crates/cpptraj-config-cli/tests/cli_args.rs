//! Argument handling through the public parser.

use clap::Parser;
use cpptraj_config_cli::{Cli, CliConfig, Commands};
use cpptraj_config_core::PlatformKind;

#[test]
fn config_prefers_explicit_profile_over_host() {
    let cli = Cli::parse_from(["cpptraj-config", "--profile", "win", "env", "--json"]);
    let config = CliConfig::from_cli(&cli);

    assert_eq!(config.platform, PlatformKind::Windows);
    assert_eq!(config.probe_timeout.as_secs(), 120);
    assert_eq!(cli.command_or_default(), Commands::Env { json: true });
}

#[test]
fn config_defaults_to_host_profile() {
    let cli = Cli::parse_from(["cpptraj-config", "--probe-timeout", "5"]);
    let config = CliConfig::from_cli(&cli);

    assert_eq!(config.platform, PlatformKind::host());
    assert_eq!(config.probe_timeout.as_secs(), 5);
}

#[test]
fn skip_probes_conflicts_with_strict() {
    let result = Cli::try_parse_from(["cpptraj-config", "generate", "--skip-probes", "--strict"]);
    assert!(result.is_err());
}
