//! CLI-specific error types and exit code mapping.

use cpptraj_config_core::{
    ConfigurationError, ConfigureError, ProbesAborted, RenderError, ToolchainError,
    WorkspaceError,
};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required paths could not be resolved from the environment.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output directories could not be created or written.
    #[error("Workspace error: {0}")]
    Workspace(String),

    /// config.h could not be rendered or written.
    #[error("Render error: {0}")]
    Render(String),

    /// The compiler could not be run at all.
    #[error("Toolchain error: {0}")]
    Toolchain(String),

    /// Some probes failed and `--strict` was given.
    #[error("{failed} of {total} dependency probes failed")]
    ProbesFailed { failed: usize, total: usize },

    /// Output to the terminal failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits:
    /// - 1: one or more probes failed under `--strict`
    /// - 2: invalid arguments (raised by clap before any handler runs)
    /// - 71: EX_OSERR, toolchain unusable
    /// - 73: EX_CANTCREAT, workspace
    /// - 74: EX_IOERR, render or terminal output
    /// - 78: EX_CONFIG, environment resolution
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ProbesFailed { .. } => 1,
            CliError::Toolchain(_) => 71,
            CliError::Workspace(_) => 73,
            CliError::Render(_) | CliError::Io(_) => 74,
            CliError::Config(_) => 78,
        }
    }
}

impl From<ConfigureError> for CliError {
    fn from(err: ConfigureError) -> Self {
        match err {
            ConfigureError::Configuration(e) => e.into(),
            ConfigureError::Workspace(e) => e.into(),
            ConfigureError::Render(e) => e.into(),
            ConfigureError::ProbesAborted(e) => e.into(),
        }
    }
}

impl From<ConfigurationError> for CliError {
    fn from(err: ConfigurationError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<WorkspaceError> for CliError {
    fn from(err: WorkspaceError) -> Self {
        CliError::Workspace(err.to_string())
    }
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        CliError::Render(err.to_string())
    }
}

impl From<ProbesAborted> for CliError {
    fn from(err: ProbesAborted) -> Self {
        err.error.into()
    }
}

impl From<ToolchainError> for CliError {
    fn from(err: ToolchainError) -> Self {
        CliError::Toolchain(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpptraj_config_core::ProbeReport;

    #[test]
    fn test_exit_codes_by_category() {
        let unresolved = ConfigureError::Configuration(ConfigurationError::NoRecipeDir);
        assert_eq!(CliError::from(unresolved).exit_code(), 78);

        let missing = ConfigureError::ProbesAborted(ProbesAborted {
            report: ProbeReport::default(),
            error: ToolchainError::NotFound {
                program: "g++".to_string(),
            },
        });
        let err = CliError::from(missing);
        assert_eq!(err.exit_code(), 71);
        assert!(err.to_string().contains("g++"));

        let blocked = WorkspaceError::NotADirectory("/build/lib".into());
        assert_eq!(CliError::from(blocked).exit_code(), 73);

        let render = RenderError::UnterminatedPlaceholder { line: 3 };
        assert_eq!(CliError::from(render).exit_code(), 74);
    }

    #[test]
    fn test_probe_failures_message() {
        let err = CliError::ProbesFailed {
            failed: 2,
            total: 3,
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "2 of 3 dependency probes failed");
    }
}
