//! Error types for gh-outbound
//!
//! All modules use `OutboundResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gh-outbound operations
pub type OutboundResult<T> = Result<T, OutboundError>;

/// All errors that can occur in gh-outbound
#[derive(Error, Debug)]
pub enum OutboundError {
    // Environment errors
    #[error("Required CLI not found: {name}. {hint}")]
    CliNotFound { name: String, hint: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Lookup errors
    #[error("License lookup failed for {repo}: {reason}")]
    ProviderLookup { repo: String, reason: String },

    #[error("Outbound license solver failed: {reason}")]
    SolverInvocation { reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, exit code: {code}, stderr: {stderr}")]
    CommandExecution {
        command: String,
        code: i32,
        stderr: String,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutboundError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CliNotFound { .. } => {
                Some("Set program and working_dir under [solver] in the config file")
            }
            Self::SolverInvocation { .. } => {
                Some("Check that flict is installed in the solver working directory")
            }
            _ => None,
        }
    }
}
