//! Error types for relwait-core

use thiserror::Error;

/// Result type for relwait-core operations
pub type Result<T> = std::result::Result<T, WaitError>;

/// Errors that stop a wait run
///
/// A missing release or a release that is still transitioning is never an
/// error; both are reported through [`crate::ReleaseSnapshot`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WaitError {
    /// The inspection command could not be started
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The inspection command ran but reported a failure
    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The inspection command printed something that is not release history
    #[error("failed to parse release history: {0}")]
    Parse(String),

    /// The poll parameters cannot produce a schedule
    #[error("invalid poll request: {0}")]
    InvalidRequest(String),
}

impl From<serde_json::Error> for WaitError {
    fn from(e: serde_json::Error) -> Self {
        WaitError::Parse(e.to_string())
    }
}

impl WaitError {
    /// Check if this error came from the inspection command rather than the caller
    pub fn is_inspection_failure(&self) -> bool {
        matches!(
            self,
            WaitError::Spawn { .. } | WaitError::CommandFailed { .. } | WaitError::Parse(_)
        )
    }
}
