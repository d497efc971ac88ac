//! # Catalog Errors

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Trivial file catalog errors
///
/// "No match" during resolution is not an error: the match operations
/// return `None` and never fail.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// A rule's path-match expression does not compile
    #[error("Invalid path-match pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The file named by a contact string does not exist
    #[error("Trivial file catalog not found: {0}")]
    NotFound(String),

    /// The catalog file could not be parsed
    #[error("Error reading trivial file catalog {path}: {reason}")]
    Parse { path: String, reason: String },

    /// The catalog could not be written back out
    #[error("Error writing trivial file catalog {path}: {reason}")]
    Write { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = CatalogError::NotFound("/etc/storage.xml".into());
        assert!(format!("{}", err).contains("/etc/storage.xml"));
    }

    #[test]
    fn test_display_includes_pattern() {
        let err = CatalogError::InvalidPattern {
            pattern: "^/store/(".into(),
            reason: "unclosed group".into(),
        };
        let display = format!("{}", err);
        assert!(display.contains("^/store/("));
        assert!(display.contains("unclosed group"));
    }
}
