//! CLI entry point - the composition root.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cpptraj_config_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Err(err) = run(&cli).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}

/// Logs go to stderr so `--dry-run` and `--json` output stays clean.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
    Ok(())
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let ctx = bootstrap(CliConfig::from_cli(cli))?;
    let command = cli.command_or_default();
    debug!("Dispatching {command:?}");

    match command {
        Commands::Generate(args) => handlers::generate::execute(&ctx, &args).await,
        Commands::Env { json } => handlers::env::execute(&ctx, json),
        Commands::Probe { strict, json } => handlers::probe::execute(&ctx, strict, json).await,
    }
}
