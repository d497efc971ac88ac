//! # File Operation Errors

use thiserror::Error;

/// Result type for file operations
pub type FileOpResult<T> = Result<T, FileOpError>;

/// Errors from the federated file-operation layer
#[derive(Debug, Clone, Error)]
pub enum FileOpError {
    /// The catalog produced no PFN for the logical name
    #[error("No catalog mapping for '{0}'")]
    NoMapping(String),

    /// The catalog resolved to a protocol with no registered backend
    #[error("Unexpected protocol from catalog: {0}")]
    UnknownProtocol(String),

    /// An external tool could not be started
    #[error("Failed to run {tool}: {reason}")]
    Spawn { tool: String, reason: String },

    /// An external tool exited with a non-zero status
    #[error("{tool} exited with code {code}: {stderr}")]
    CommandFailed {
        tool: String,
        code: i32,
        stderr: String,
    },

    /// An external tool produced output we could not interpret
    #[error("Could not parse {tool} output: {output}")]
    BadOutput { tool: String, output: String },

    /// The operation is not available for this backend
    #[error("{0}")]
    Unsupported(String),

    /// The target does not exist
    #[error("No such file or directory: {0}")]
    NotFound(String),

    /// Local filesystem error
    #[error("I/O error: {0}")]
    Io(String),
}
