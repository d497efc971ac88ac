//! # Observability
//!
//! Structured logging for diagnostics that must not interrupt normal
//! operation, such as skipped catalog entries.

pub mod logger;

pub use logger::{Logger, Severity};
