//! Error types for the configure pipeline.
//!
//! Each component owns a small error enum; `ConfigureError` aggregates them
//! for callers that drive the whole pipeline.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::probe::ProbeReport;

/// A required path could not be resolved from the environment.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Neither the direct variable nor any fallback produced a value.
    #[error("Cannot resolve {key}: set {variables}")]
    Unresolved {
        key: &'static str,
        variables: String,
    },

    /// A variable or directory holds a path that is not valid Unicode.
    #[error("{key} is not valid Unicode: {}", path.display())]
    NotUnicode { key: &'static str, path: PathBuf },

    /// The current working directory is unavailable.
    #[error("Cannot determine current directory: {0}")]
    CurrentDir(String),

    /// No `RECIPE_DIR` and the running executable has no parent directory.
    #[error("Cannot resolve recipe_dir: set RECIPE_DIR")]
    NoRecipeDir,
}

/// The output directories could not be prepared.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// A directory is not writable.
    #[error("Directory {path} is not writable: {reason}")]
    NotWritable { path: PathBuf, reason: String },
}

/// The configuration document could not be rendered or written.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template references a name with no value.
    #[error("Unresolved placeholder {{{name}}} on template line {line}")]
    UnresolvedPlaceholder { name: String, line: usize },

    /// A `{` with no matching `}` on the same line.
    #[error("Unterminated placeholder on template line {line}")]
    UnterminatedPlaceholder { line: usize },

    /// Writing or renaming the output file failed.
    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// The native compiler could not be used at all.
///
/// A compiler that runs and rejects the trial program is *not* an error;
/// that outcome is reported through `ProbeResult`.
#[derive(Debug, Error)]
pub enum ToolchainError {
    /// The compiler executable was not found.
    #[error("Compiler '{program}' not found on PATH")]
    NotFound { program: String },

    /// The compiler did not finish within the configured timeout.
    #[error("Compiler '{program}' did not finish within {after:?}")]
    TimedOut { program: String, after: Duration },

    /// The compiler could not be started for another reason.
    #[error("Failed to start '{program}': {reason}")]
    Spawn { program: String, reason: String },

    /// A trial source could neither be found nor generated.
    #[error("Trial source {path}: {reason}")]
    TrialSource { path: PathBuf, reason: String },
}

/// Probing stopped on a `ToolchainError`.
///
/// `report` holds every probe that finished before the failure, so their
/// outcomes can still be shown.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ProbesAborted {
    pub report: ProbeReport,
    pub error: ToolchainError,
}

/// Any fatal error raised by the configure pipeline.
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    ProbesAborted(#[from] ProbesAborted),
}
