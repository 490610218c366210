//! Toolchain port: the seam between probing logic and process spawning.
//!
//! Core owns the trait and the invocation types; the runtime crate owns the
//! implementation that actually runs a compiler.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ToolchainError;

/// A single compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl ToolInvocation {
    /// Render as a shell-like command line for diagnostics.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(char::is_whitespace) && !arg.contains(['"', '\'']) {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('"', "\\\""))
}

/// What a finished compiler process produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// stdout followed by stderr, trimmed.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, true) => String::new(),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (false, false) => format!("{stdout}\n{stderr}"),
        }
    }
}

/// Port for running the native toolchain.
///
/// `Ok` means the compiler ran to completion, whatever its exit status.
/// `Err` is reserved for a compiler that cannot be run at all or that
/// exceeds the implementation's time bound.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolchainPort: Send + Sync {
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolchainError>;
}
