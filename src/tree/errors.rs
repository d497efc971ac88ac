//! # Tree Errors

use thiserror::Error;

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors from loading, querying, or serializing a node tree
#[derive(Debug, Clone, Error)]
pub enum TreeError {
    #[error("I/O error reading {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Document contains no root element")]
    Empty,

    #[error("Serialization failed: {0}")]
    Serialize(String),
}
