//! fedcat - rule-based LFN/PFN resolution for a distributed storage federation
//!
//! A trivial file catalog (TFC) maps logical file names to physical file
//! names through an ordered list of regex rewrite rules, and back. On top of
//! the catalog sits a thin file-operation layer that dispatches stat/list/
//! remove/mkdir/rmdir to a per-protocol backend.

pub mod catalog;
pub mod cli;
pub mod fileops;
pub mod observability;
pub mod tree;
