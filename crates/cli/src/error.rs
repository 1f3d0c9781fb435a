//! CLI error taxonomy with stable process exit codes.

use thiserror::Error;
use wavefield_core::error::EngineError;

/// Errors surfaced to the shell. Each category maps to a fixed exit code so
/// scripts can branch on the failure class.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("engine error: {0}")]
    Engine(EngineError),

    #[error("io error: {0}")]
    Io(String),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// The process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            // File-system failures keep the io exit code even when they
            // arrive wrapped in an engine error.
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}
