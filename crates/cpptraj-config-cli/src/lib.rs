//! # cpptraj-config-cli
//!
//! The `cpptraj-config` command: parses arguments, composes the core
//! services with the process toolchain, and presents the results.

#![deny(unused_crate_dependencies)]

// Used by the binary only
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, GenerateArgs};
pub use error::CliError;
pub use parser::Cli;
