//! Subcommands.

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write config.h, create lib/ and bin/, then probe dependencies (default)
    Generate(GenerateArgs),

    /// Show the resolved include, library and output paths
    Env {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Probe NetCDF, zlib and BLAS without writing any files
    Probe {
        /// Exit non-zero if any probe fails
        #[arg(long)]
        strict: bool,
        /// Print the probe report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Print config.h to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Write the configuration but skip the dependency probes
    #[arg(long, conflicts_with = "strict")]
    pub skip_probes: bool,

    /// Exit non-zero if any probe fails
    #[arg(long)]
    pub strict: bool,
}
