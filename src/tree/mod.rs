//! # Structured Document Tree
//!
//! A minimal tree of named nodes with string attributes, ordered children,
//! and optional character data, plus an XML loader, a slash-path query, and
//! a pretty-printing writer. This is the external representation the
//! catalog persists through.

pub mod errors;
pub mod loader;
pub mod node;
pub mod query;
pub mod writer;

pub use errors::{TreeError, TreeResult};
pub use loader::{parse_file, parse_str};
pub use node::Node;
pub use query::query;
pub use writer::to_xml;
