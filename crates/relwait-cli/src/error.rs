//! CLI error types with exit code handling

use miette::Diagnostic;
use relwait_core::WaitError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Arguments that passed parsing but cannot drive a wait
    #[error("Invalid arguments: {message}")]
    #[diagnostic(code(relwait::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The release inspector failed; the wait was aborted
    #[error("Release inspection failed: {message}")]
    #[diagnostic(code(relwait::cli::inspect))]
    Inspect {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(relwait::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Inspect { .. } => exit_codes::INSPECT_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }
}

impl From<WaitError> for CliError {
    fn from(err: WaitError) -> Self {
        match &err {
            WaitError::InvalidRequest(message) => CliError::Usage {
                message: message.clone(),
                help: Some("--timeout and --interval take a whole number of seconds, at least 1".to_string()),
            },
            WaitError::Spawn { program, .. } => CliError::Inspect {
                message: err.to_string(),
                help: Some(format!(
                    "Is `{}` installed? Use --helm-bin or HELM_BIN to point at the helm executable",
                    program
                )),
            },
            _ if err.is_inspection_failure() => CliError::Inspect {
                message: err.to_string(),
                help: None,
            },
            _ => CliError::internal(&err),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_is_usage_error() {
        let err: CliError = WaitError::InvalidRequest("interval must be at least 1 second".into()).into();
        assert_eq!(err.exit_code(), exit_codes::USAGE_ERROR);
    }

    #[test]
    fn test_spawn_failure_suggests_helm_bin() {
        let err: CliError = WaitError::Spawn {
            program: "helm".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();

        assert_eq!(err.exit_code(), exit_codes::INSPECT_ERROR);
        match err {
            CliError::Inspect { help: Some(help), .. } => assert!(help.contains("--helm-bin")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_command_failure_keeps_stderr() {
        let err: CliError = WaitError::CommandFailed {
            program: "helm".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "Error: Kubernetes cluster unreachable".to_string(),
        }
        .into();

        assert_eq!(err.exit_code(), exit_codes::INSPECT_ERROR);
        assert!(err.to_string().contains("cluster unreachable"));
    }

    #[test]
    fn test_unreadable_output_is_inspect_error() {
        let err: CliError = WaitError::Parse("expected value at line 1 column 1".to_string()).into();

        assert_eq!(err.exit_code(), exit_codes::INSPECT_ERROR);
        assert!(matches!(err, CliError::Inspect { help: None, .. }));
    }
}
