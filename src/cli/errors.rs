//! CLI-specific error types

use std::fmt;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or contact-string error
    ConfigError,
    /// Catalog could not be loaded
    CatalogError,
    /// A file operation failed
    FileOpError,
    /// No catalog rule matched the given name
    NoMatch,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FEDCAT_CONFIG_ERROR",
            Self::CatalogError => "FEDCAT_CATALOG_ERROR",
            Self::FileOpError => "FEDCAT_FILEOP_ERROR",
            Self::NoMatch => "FEDCAT_NO_MATCH",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Catalog load error
    pub fn catalog_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::CatalogError, msg)
    }

    /// File operation error
    pub fn fileop_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::FileOpError, msg)
    }

    /// No rule matched
    pub fn no_match(path: &str) -> Self {
        Self::new(
            CliErrorCode::NoMatch,
            format!("No catalog rule matched '{}'", path),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}
